//! Typed wrappers over every backend endpoint the dashboard calls.

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;

use super::http::{ApiRequest, FormValue, HttpTransport, HttpUtils};
use crate::domain::{
    backtest::{BacktestResult, BacktestRun},
    bots::{Bot, BotActivity, BotAnalysis, BotDraft, BotId, Fundamentals, ParamMap, StrategyInfo, StrategyParam},
    dashboard::{AccountInfo, ChartData, DashboardStats, Emotion, EmotionUpdate, MentorSummary, RsiData},
    errors::AppResult,
    market::{CryptoQuote, ForexBoard, StockQuote, SymbolProfile},
    notifications::{Notification, UnreadCount, UnreadNotification},
    portfolio::{Allocation, Deal, Position},
    preferences::{ProfileUpdate, UserProfile},
};

pub mod endpoints {
    use super::{BotId, HttpUtils};

    pub const BOTS: &str = "/api/bots";
    pub const STRATEGIES: &str = "/api/strategies";
    pub const BACKTEST_RUN: &str = "/api/backtest/run";
    pub const BACKTEST_HISTORY: &str = "/api/backtest/history";
    pub const DEAL_HISTORY: &str = "/api/history";
    pub const OPEN_POSITIONS: &str = "/api/portfolio/open-positions";
    pub const ALLOCATION: &str = "/api/portfolio/allocation";
    pub const FOREX_DATA: &str = "/api/forex-data";
    pub const STOCKS: &str = "/api/stocks";
    pub const CRYPTO: &str = "/api/crypto";
    pub const NOTIFICATIONS: &str = "/api/notifications";
    pub const NOTIFICATIONS_UNREAD: &str = "/api/notifications/unread";
    pub const NOTIFICATIONS_UNREAD_COUNT: &str = "/api/notifications/unread-count";
    pub const NOTIFICATIONS_MARK_READ: &str = "/api/notifications/mark-as-read";
    pub const DASHBOARD_STATS: &str = "/api/dashboard/stats";
    pub const ACCOUNT_INFO: &str = "/api/account-info";
    pub const PROFILE: &str = "/api/profile";
    pub const MENTOR_SUMMARY: &str = "/ai-mentor/api/dashboard-summary";
    pub const MENTOR_EMOTIONS: &str = "/ai-mentor/update-emotions";

    pub fn bot(id: BotId) -> String {
        format!("{}/{}", BOTS, id)
    }

    pub fn bot_action(id: BotId, action: &str) -> String {
        format!("{}/{}/{}", BOTS, id, action)
    }

    pub fn strategy_params(strategy_id: &str) -> String {
        format!("{}/{}/params", STRATEGIES, HttpUtils::url_encode(strategy_id))
    }

    pub fn forex_profile(symbol: &str) -> String {
        format!("/api/forex/{}/profile", HttpUtils::url_encode(symbol))
    }

    pub fn stock_profile(symbol: &str) -> String {
        format!("/api/stocks/{}/profile", HttpUtils::url_encode(symbol))
    }

    pub fn chart_data(symbol: &str) -> String {
        format!("/api/chart/data?symbol={}", HttpUtils::url_encode(symbol))
    }

    pub fn rsi_data(symbol: &str) -> String {
        format!("/api/rsi_data?symbol={}&timeframe=H1", HttpUtils::url_encode(symbol))
    }
}

/// `{message, bot_id?}` returned by mutating endpoints.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ServerMessage {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub bot_id: Option<BotId>,
    /// Only the AI mentor endpoints report this; absent means success.
    #[serde(default)]
    pub success: Option<bool>,
}

/// A backtest submission: the uploaded CSV plus strategy parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct BacktestUpload {
    pub file: FormValue,
    pub strategy: String,
    pub params: ParamMap,
}

#[derive(Debug, Clone)]
pub struct QuantumApi<T> {
    transport: T,
}

impl<T: HttpTransport> QuantumApi<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    async fn fetch<R: DeserializeOwned>(&self, request: ApiRequest) -> AppResult<R> {
        self.transport.send(request).await?.decode()
    }

    async fn get<R: DeserializeOwned>(&self, path: impl Into<String>) -> AppResult<R> {
        self.fetch(ApiRequest::get(path)).await
    }

    /// Mutations answer with `{message}`; an empty body is fine too.
    async fn command(&self, request: ApiRequest) -> AppResult<ServerMessage> {
        let body = self.transport.send(request).await?.into_result()?;
        match body {
            Value::Null => Ok(ServerMessage::default()),
            other => Ok(serde_json::from_value(other)?),
        }
    }

    pub async fn list_bots(&self) -> AppResult<Vec<Bot>> {
        self.get(endpoints::BOTS).await
    }

    pub async fn get_bot(&self, id: BotId) -> AppResult<Bot> {
        self.get(endpoints::bot(id)).await
    }

    pub async fn create_bot(&self, draft: &BotDraft) -> AppResult<ServerMessage> {
        self.command(ApiRequest::post(endpoints::BOTS).with_json(serde_json::to_value(draft)?))
            .await
    }

    pub async fn update_bot(&self, id: BotId, draft: &BotDraft) -> AppResult<ServerMessage> {
        self.command(ApiRequest::put(endpoints::bot(id)).with_json(serde_json::to_value(draft)?))
            .await
    }

    pub async fn delete_bot(&self, id: BotId) -> AppResult<ServerMessage> {
        self.command(ApiRequest::delete(endpoints::bot(id))).await
    }

    pub async fn start_bot(&self, id: BotId) -> AppResult<ServerMessage> {
        self.command(ApiRequest::post(endpoints::bot_action(id, "start"))).await
    }

    pub async fn stop_bot(&self, id: BotId) -> AppResult<ServerMessage> {
        self.command(ApiRequest::post(endpoints::bot_action(id, "stop"))).await
    }

    pub async fn bot_history(&self, id: BotId) -> AppResult<Vec<BotActivity>> {
        self.get(endpoints::bot_action(id, "history")).await
    }

    pub async fn bot_analysis(&self, id: BotId) -> AppResult<BotAnalysis> {
        self.get(endpoints::bot_action(id, "analysis")).await
    }

    pub async fn bot_fundamentals(&self, id: BotId) -> AppResult<Fundamentals> {
        self.get(endpoints::bot_action(id, "fundamentals")).await
    }

    pub async fn strategies(&self) -> AppResult<Vec<StrategyInfo>> {
        self.get(endpoints::STRATEGIES).await
    }

    pub async fn strategy_params(&self, strategy_id: &str) -> AppResult<Vec<StrategyParam>> {
        self.get(endpoints::strategy_params(strategy_id)).await
    }

    pub async fn run_backtest(&self, upload: BacktestUpload) -> AppResult<BacktestResult> {
        let params = serde_json::to_string(&upload.params)?;
        let request = ApiRequest::post(endpoints::BACKTEST_RUN).with_multipart(vec![
            ("file".to_string(), upload.file),
            ("strategy".to_string(), FormValue::Text(upload.strategy)),
            ("params".to_string(), FormValue::Text(params)),
        ]);
        self.fetch(request).await
    }

    pub async fn backtest_history(&self) -> AppResult<Vec<BacktestRun>> {
        self.get(endpoints::BACKTEST_HISTORY).await
    }

    pub async fn deal_history(&self) -> AppResult<Vec<Deal>> {
        self.get(endpoints::DEAL_HISTORY).await
    }

    pub async fn open_positions(&self) -> AppResult<Vec<Position>> {
        self.get(endpoints::OPEN_POSITIONS).await
    }

    pub async fn allocation(&self) -> AppResult<Allocation> {
        self.get(endpoints::ALLOCATION).await
    }

    pub async fn forex_data(&self) -> AppResult<ForexBoard> {
        self.get(endpoints::FOREX_DATA).await
    }

    pub async fn forex_profile(&self, symbol: &str) -> AppResult<SymbolProfile> {
        self.get(endpoints::forex_profile(symbol)).await
    }

    pub async fn stocks(&self) -> AppResult<Vec<StockQuote>> {
        self.get(endpoints::STOCKS).await
    }

    pub async fn stock_profile(&self, symbol: &str) -> AppResult<SymbolProfile> {
        self.get(endpoints::stock_profile(symbol)).await
    }

    pub async fn crypto(&self) -> AppResult<Vec<CryptoQuote>> {
        self.get(endpoints::CRYPTO).await
    }

    pub async fn notifications(&self) -> AppResult<Vec<Notification>> {
        self.get(endpoints::NOTIFICATIONS).await
    }

    pub async fn unread_notifications(&self) -> AppResult<Vec<UnreadNotification>> {
        self.get(endpoints::NOTIFICATIONS_UNREAD).await
    }

    pub async fn unread_count(&self) -> AppResult<UnreadCount> {
        self.get(endpoints::NOTIFICATIONS_UNREAD_COUNT).await
    }

    pub async fn mark_notifications_read(&self) -> AppResult<ServerMessage> {
        self.command(ApiRequest::post(endpoints::NOTIFICATIONS_MARK_READ)).await
    }

    pub async fn dashboard_stats(&self) -> AppResult<DashboardStats> {
        self.get(endpoints::DASHBOARD_STATS).await
    }

    pub async fn account_info(&self) -> AppResult<AccountInfo> {
        self.get(endpoints::ACCOUNT_INFO).await
    }

    pub async fn chart_data(&self, symbol: &str) -> AppResult<ChartData> {
        self.get(endpoints::chart_data(symbol)).await
    }

    pub async fn rsi_data(&self, symbol: &str) -> AppResult<RsiData> {
        self.get(endpoints::rsi_data(symbol)).await
    }

    pub async fn mentor_summary(&self) -> AppResult<MentorSummary> {
        self.get(endpoints::MENTOR_SUMMARY).await
    }

    pub async fn update_emotion(&self, emotion: Emotion) -> AppResult<ServerMessage> {
        let body = serde_json::to_value(EmotionUpdate { emotions: emotion })?;
        self.command(ApiRequest::post(endpoints::MENTOR_EMOTIONS).with_json(body)).await
    }

    pub async fn profile(&self) -> AppResult<UserProfile> {
        self.get(endpoints::PROFILE).await
    }

    pub async fn update_profile(&self, update: &ProfileUpdate) -> AppResult<ServerMessage> {
        self.command(ApiRequest::put(endpoints::PROFILE).with_json(serde_json::to_value(update)?))
            .await
    }
}
