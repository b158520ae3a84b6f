//! Market data pages: forex, stocks and crypto quote boards. Forex and stock
//! rows carry a details button that opens the symbol profile modal.

use std::rc::Rc;

use crate::application::poll_unit::{PageScope, PollUnit, RenderTarget};
use crate::config::client_config;
use crate::domain::{
    logging::LogComponent,
    market::{CryptoQuote, ForexBoard, QuoteBoard, StockQuote},
};
use crate::infrastructure::{api::QuantumApi, http::HttpTransport};
use crate::presentation::markup::escape;
use crate::presentation::renderers::{
    CryptoPresenter, ForexPresenter, StocksPresenter,
    market::{PROFILE_LOADING, profile_body},
};

use super::ModalSurface;

/// Contract specification popup shared by the forex and stock boards.
pub struct ProfileModal<T> {
    api: Rc<QuantumApi<T>>,
    board: QuoteBoard,
    modal: Rc<dyn ModalSurface>,
}

impl<T: HttpTransport> ProfileModal<T> {
    pub fn new(api: Rc<QuantumApi<T>>, board: QuoteBoard, modal: Rc<dyn ModalSurface>) -> Self {
        Self { api, board, modal }
    }

    pub async fn open(&self, symbol: &str) {
        self.modal.set_title(PROFILE_LOADING);
        self.modal.set_body("");
        self.modal.show();

        let profile = match self.board {
            QuoteBoard::Forex => self.api.forex_profile(symbol).await,
            QuoteBoard::Stocks => self.api.stock_profile(symbol).await,
        };
        match profile {
            Ok(profile) => {
                self.modal.set_title(&profile.name);
                self.modal.set_body(&profile_body(&profile));
            }
            Err(err) => {
                crate::log_error!(
                    LogComponent::Presentation("ProfileModal"),
                    "{} profile failed: {}",
                    symbol,
                    err,
                );
                self.modal.set_title("Error");
                self.modal.set_body(&escape(&err.user_message()));
            }
        }
    }

    pub fn close(&self) {
        self.modal.hide();
    }
}

pub struct ForexPage<T> {
    unit: PollUnit<ForexBoard>,
    profile: ProfileModal<T>,
}

impl<T: HttpTransport + 'static> ForexPage<T> {
    pub fn new(api: Rc<QuantumApi<T>>, table: Rc<dyn RenderTarget>, modal: Rc<dyn ModalSurface>) -> Self {
        let fetch_api = api.clone();
        let unit = PollUnit::new(
            "forex",
            move || {
                let api = fetch_api.clone();
                async move { api.forex_data().await }
            },
            Rc::new(ForexPresenter),
            table,
        )
        .every(client_config().forex_interval);
        Self { unit, profile: ProfileModal::new(api, QuoteBoard::Forex, modal) }
    }

    pub fn unit(&self) -> &PollUnit<ForexBoard> {
        &self.unit
    }

    pub fn profile(&self) -> &ProfileModal<T> {
        &self.profile
    }

    pub fn mount(&self, scope: &PageScope) {
        scope.track(self.unit.start());
    }
}

pub struct StocksPage<T> {
    unit: PollUnit<Vec<StockQuote>>,
    profile: ProfileModal<T>,
}

impl<T: HttpTransport + 'static> StocksPage<T> {
    pub fn new(api: Rc<QuantumApi<T>>, table: Rc<dyn RenderTarget>, modal: Rc<dyn ModalSurface>) -> Self {
        let fetch_api = api.clone();
        let unit = PollUnit::new(
            "stocks",
            move || {
                let api = fetch_api.clone();
                async move { api.stocks().await }
            },
            Rc::new(StocksPresenter),
            table,
        )
        .every(client_config().stocks_interval);
        Self { unit, profile: ProfileModal::new(api, QuoteBoard::Stocks, modal) }
    }

    pub fn unit(&self) -> &PollUnit<Vec<StockQuote>> {
        &self.unit
    }

    pub fn profile(&self) -> &ProfileModal<T> {
        &self.profile
    }

    pub fn mount(&self, scope: &PageScope) {
        scope.track(self.unit.start());
    }
}

pub struct CryptoPage {
    unit: PollUnit<Vec<CryptoQuote>>,
}

impl CryptoPage {
    pub fn new<T: HttpTransport + 'static>(api: Rc<QuantumApi<T>>, table: Rc<dyn RenderTarget>) -> Self {
        let unit = PollUnit::new(
            "crypto",
            move || {
                let api = api.clone();
                async move { api.crypto().await }
            },
            Rc::new(CryptoPresenter),
            table,
        )
        .every(client_config().crypto_interval);
        Self { unit }
    }

    pub fn unit(&self) -> &PollUnit<Vec<CryptoQuote>> {
        &self.unit
    }

    pub fn mount(&self, scope: &PageScope) {
        scope.track(self.unit.start());
    }
}
