//! Bot detail page. Header and parameters come from the bot record; the
//! activity log and the analysis panel poll independently. Analysis needs
//! the bot's strategy, so its cycle awaits the cached details first.

use std::rc::Rc;

use crate::application::{
    poll_unit::{PageScope, PollUnit, Presenter, RenderTarget, browser_timer},
    sequence::DependencyCell,
};
use crate::config::client_config;
use crate::domain::bots::{Bot, BotActivity, BotId, Fundamentals, has_fundamentals};
use crate::infrastructure::{api::QuantumApi, http::HttpTransport};
use crate::presentation::renderers::{
    ActivityLogPresenter, AnalysisPresenter, BotHeaderPresenter, BotParametersPresenter, FundamentalsPresenter,
    bot_detail::StrategyAnalysis,
};

/// Containers of the detail page.
pub struct BotDetailTargets {
    pub header: Rc<dyn RenderTarget>,
    pub parameters: Rc<dyn RenderTarget>,
    pub activity: Rc<dyn RenderTarget>,
    pub analysis: Rc<dyn RenderTarget>,
    pub fundamentals: Rc<dyn RenderTarget>,
}

pub struct BotDetailPage {
    details: PollUnit<Bot>,
    activity: PollUnit<Vec<BotActivity>>,
    analysis: PollUnit<StrategyAnalysis>,
    fundamentals: PollUnit<Fundamentals>,
}

impl BotDetailPage {
    pub fn new<T: HttpTransport + 'static>(api: Rc<QuantumApi<T>>, bot_id: BotId, targets: BotDetailTargets) -> Self {
        let config = client_config();

        let loader_api = api.clone();
        let bot = DependencyCell::new(move || {
            let api = loader_api.clone();
            async move { api.get_bot(bot_id).await }
        });

        let details_cell = bot.clone();
        let parameters = targets.parameters.clone();
        let details = PollUnit::new(
            "bot-details",
            move || {
                let bot = details_cell.clone();
                async move { bot.reload().await }
            },
            Rc::new(BotHeaderPresenter),
            targets.header,
        )
        .after_render(move |bot: &Bot| parameters.write(&BotParametersPresenter.present(bot)));

        let activity_api = api.clone();
        let activity = PollUnit::new(
            "bot-activity",
            move || {
                let api = activity_api.clone();
                async move { api.bot_history(bot_id).await }
            },
            Rc::new(ActivityLogPresenter),
            targets.activity,
        )
        .every(config.bot_activity_interval);

        let analysis_api = api.clone();
        let analysis_cell = bot.clone();
        let analysis = PollUnit::new(
            "bot-analysis",
            move || {
                let api = analysis_api.clone();
                let bot = analysis_cell.clone();
                async move {
                    let strategy = bot.get_or_load().await?.strategy;
                    let analysis = api.bot_analysis(bot_id).await?;
                    Ok(StrategyAnalysis { strategy, analysis })
                }
            },
            Rc::new(AnalysisPresenter),
            targets.analysis,
        )
        .every(config.bot_analysis_interval);

        let fundamentals_cell = bot;
        let fundamentals = PollUnit::new(
            "bot-fundamentals",
            move || {
                let api = api.clone();
                let bot = fundamentals_cell.clone();
                async move {
                    let market = bot.get_or_load().await?.market;
                    if !has_fundamentals(&market) {
                        return Ok(Fundamentals::default());
                    }
                    api.bot_fundamentals(bot_id).await
                }
            },
            Rc::new(FundamentalsPresenter),
            targets.fundamentals,
        );

        Self { details, activity, analysis, fundamentals }
    }

    pub fn details(&self) -> &PollUnit<Bot> {
        &self.details
    }

    pub fn activity(&self) -> &PollUnit<Vec<BotActivity>> {
        &self.activity
    }

    pub fn analysis(&self) -> &PollUnit<StrategyAnalysis> {
        &self.analysis
    }

    pub fn fundamentals(&self) -> &PollUnit<Fundamentals> {
        &self.fundamentals
    }

    /// Details load first; the analysis loop and the fundamentals card follow.
    pub fn mount(&self, scope: &PageScope) {
        scope.track(self.activity.start());

        let (analysis_handle, analysis_loop) = self.analysis.looped(browser_timer());
        scope.track(analysis_handle);
        let details = self.details.clone();
        let fundamentals = self.fundamentals.clone();
        scope.spawn("bot-detail", async move {
            details.refresh().await;
            futures::join!(analysis_loop, fundamentals.refresh());
        });
    }
}
