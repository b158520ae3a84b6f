//! Global deal history. Fetched once; header clicks re-sort the cached rows
//! without another request.

use std::cell::RefCell;
use std::rc::Rc;

use crate::application::{
    history_sort::{SortColumn, SortState},
    poll_unit::{PageScope, PollUnit, Presenter, RenderTarget},
};
use crate::domain::portfolio::Deal;
use crate::infrastructure::{api::QuantumApi, http::HttpTransport};
use crate::presentation::renderers::DealTablePresenter;

/// Glyph slot next to one sortable header.
pub type HeaderGlyphs = Vec<(SortColumn, Rc<dyn RenderTarget>)>;

pub struct HistoryPage {
    unit: PollUnit<Vec<Deal>>,
    deals: Rc<RefCell<Vec<Deal>>>,
    sort: Rc<RefCell<SortState>>,
    table: Rc<dyn RenderTarget>,
    glyphs: HeaderGlyphs,
}

impl HistoryPage {
    pub fn new<T: HttpTransport + 'static>(
        api: Rc<QuantumApi<T>>,
        table: Rc<dyn RenderTarget>,
        glyphs: HeaderGlyphs,
    ) -> Self {
        let deals = Rc::new(RefCell::new(Vec::new()));
        let sort = Rc::new(RefCell::new(SortState::default()));

        let cache = deals.clone();
        let state = sort.clone();
        let unit = PollUnit::new(
            "history",
            move || {
                let api = api.clone();
                let cache = cache.clone();
                let state = state.clone();
                async move {
                    let mut fetched = api.deal_history().await?;
                    state.borrow().apply(&mut fetched);
                    *cache.borrow_mut() = fetched.clone();
                    Ok(fetched)
                }
            },
            Rc::new(DealTablePresenter),
            table.clone(),
        );

        Self { unit, deals, sort, table, glyphs }
    }

    pub fn unit(&self) -> &PollUnit<Vec<Deal>> {
        &self.unit
    }

    pub fn sort_state(&self) -> SortState {
        *self.sort.borrow()
    }

    pub fn mount(&self, scope: &PageScope) {
        scope.track(self.unit.start());
        self.render_glyphs();
    }

    /// Header click: toggle, re-sort the cached rows, rewrite table and glyphs.
    pub fn sort_by(&self, column: SortColumn) {
        self.sort.borrow_mut().toggle(column);
        let state = *self.sort.borrow();
        let mut deals = self.deals.borrow_mut();
        state.apply(&mut deals);

        let presenter = DealTablePresenter;
        let markup = if presenter.is_empty(&deals) {
            presenter.empty()
        } else {
            presenter.present(&deals)
        };
        self.table.write(&markup);
        drop(deals);
        self.render_glyphs();
    }

    fn render_glyphs(&self) {
        let state = *self.sort.borrow();
        for (column, target) in &self.glyphs {
            target.write(state.glyph_for(*column));
        }
    }
}
