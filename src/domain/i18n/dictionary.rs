//! Built-in UI strings.

pub(super) const ID: &[(&str, &str)] = &[
    ("nav.dashboard", "Dasbor"),
    ("nav.bots", "Bot Trading"),
    ("nav.backtest", "Backtester"),
    ("nav.history", "Riwayat"),
    ("nav.portfolio", "Portofolio"),
    ("nav.notifications", "Notifikasi"),
    ("nav.settings", "Pengaturan"),
    ("nav.profile", "Profil"),
    ("nav.logout", "Keluar"),
    ("dashboard.title", "Dasbor QuantumBotX"),
    ("dashboard.welcome", "Selamat Datang"),
    ("dashboard.total_bots", "Total Bot"),
    ("dashboard.active_bots", "Bot Aktif"),
    ("dashboard.inactive_bots", "Bot Tidak Aktif"),
    ("dashboard.total_profit", "Total Profit"),
    ("dashboard.today_pnl", "PnL Hari Ini"),
    ("dashboard.create_bot", "Buat Bot Baru"),
    ("dashboard.view_details", "Lihat Detail"),
    ("status.active", "Aktif"),
    ("status.inactive", "Dijeda"),
    ("status.error", "Error"),
    ("status.paused", "Dijeda"),
    ("action.start", "Jalankan"),
    ("action.stop", "Hentikan"),
    ("action.edit", "Edit"),
    ("action.delete", "Hapus"),
    ("action.view", "Lihat"),
    ("action.analyze", "Analisis"),
    ("label.name", "Nama"),
    ("label.market", "Pasar"),
    ("label.strategy", "Strategi"),
    ("label.status", "Status"),
    ("label.profit", "Profit"),
    ("label.trades", "Jumlah Trade"),
    ("label.win_rate", "Win Rate"),
    ("msg.loading", "Memuat..."),
    ("msg.no_data", "Tidak ada data"),
    ("msg.success", "Berhasil"),
    ("msg.error", "Error"),
    ("msg.confirm", "Apakah Anda yakin?"),
    ("msg.preferences_saved", "Preferensi berhasil disimpan!"),
    ("msg.profile_saved", "Profil berhasil disimpan!"),
    ("time.today", "Hari Ini"),
    ("time.yesterday", "Kemarin"),
    ("time.week", "Minggu Ini"),
    ("time.month", "Bulan Ini"),
    ("error.connection", "Gagal terhubung ke server"),
    ("error.loading", "Gagal memuat data"),
    ("error.save", "Gagal menyimpan perubahan"),
    ("mentor.greeting", "Halo, Teman Trader!"),
    ("mentor.welcome", "Selamat datang di sistem trading AI saya"),
    ("currency.usd", "USD"),
    ("currency.idr", "IDR"),
    ("currency.percentage", "%"),
    ("settings.title", "Pengaturan"),
    ("settings.profile", "Profil"),
    ("settings.full_name", "Nama Lengkap"),
    ("settings.email", "Alamat Email"),
    ("settings.preferences", "Preferensi"),
    ("settings.language", "Bahasa"),
    ("settings.theme", "Tema"),
    ("settings.theme_light", "Terang"),
    ("settings.theme_dark", "Gelap (Segera Hadir)"),
    ("settings.notifications", "Notifikasi Email"),
    ("settings.auto_update", "Update Otomatis Strategi"),
    ("settings.demo_mode", "Mode Demo"),
    ("settings.save", "Simpan Perubahan"),
    ("settings.save_preferences", "Simpan Preferensi"),
];

pub(super) const EN: &[(&str, &str)] = &[
    ("nav.dashboard", "Dashboard"),
    ("nav.bots", "Trading Bots"),
    ("nav.backtest", "Backtester"),
    ("nav.history", "History"),
    ("nav.portfolio", "Portfolio"),
    ("nav.notifications", "Notifications"),
    ("nav.settings", "Settings"),
    ("nav.profile", "Profile"),
    ("nav.logout", "Logout"),
    ("dashboard.title", "QuantumBotX Dashboard"),
    ("dashboard.welcome", "Welcome"),
    ("dashboard.total_bots", "Total Bots"),
    ("dashboard.active_bots", "Active Bots"),
    ("dashboard.inactive_bots", "Inactive Bots"),
    ("dashboard.total_profit", "Total Profit"),
    ("dashboard.today_pnl", "Today's P&L"),
    ("dashboard.create_bot", "Create New Bot"),
    ("dashboard.view_details", "View Details"),
    ("status.active", "Active"),
    ("status.inactive", "Inactive"),
    ("status.error", "Error"),
    ("status.paused", "Paused"),
    ("action.start", "Start"),
    ("action.stop", "Stop"),
    ("action.edit", "Edit"),
    ("action.delete", "Delete"),
    ("action.view", "View"),
    ("action.analyze", "Analyze"),
    ("label.name", "Name"),
    ("label.market", "Market"),
    ("label.strategy", "Strategy"),
    ("label.status", "Status"),
    ("label.profit", "Profit"),
    ("label.trades", "Trades"),
    ("label.win_rate", "Win Rate"),
    ("msg.loading", "Loading..."),
    ("msg.no_data", "No data available"),
    ("msg.success", "Success"),
    ("msg.error", "Error"),
    ("msg.confirm", "Are you sure?"),
    ("msg.preferences_saved", "Preferences saved successfully!"),
    ("msg.profile_saved", "Profile saved successfully!"),
    ("time.today", "Today"),
    ("time.yesterday", "Yesterday"),
    ("time.week", "This Week"),
    ("time.month", "This Month"),
    ("error.connection", "Failed to connect to server"),
    ("error.loading", "Failed to load data"),
    ("error.save", "Failed to save changes"),
    ("mentor.greeting", "Hello, Trading Friend!"),
    ("mentor.welcome", "Welcome to my AI trading system"),
    ("currency.usd", "USD"),
    ("currency.idr", "IDR"),
    ("currency.percentage", "%"),
    ("settings.title", "Settings"),
    ("settings.profile", "Profile"),
    ("settings.full_name", "Full Name"),
    ("settings.email", "Email Address"),
    ("settings.preferences", "Preferences"),
    ("settings.language", "Language"),
    ("settings.theme", "Theme"),
    ("settings.theme_light", "Light"),
    ("settings.theme_dark", "Dark (Coming Soon)"),
    ("settings.notifications", "Email Notifications"),
    ("settings.auto_update", "Auto Strategy Updates"),
    ("settings.demo_mode", "Demo Mode"),
    ("settings.save", "Save Changes"),
    ("settings.save_preferences", "Save Preferences"),
];
