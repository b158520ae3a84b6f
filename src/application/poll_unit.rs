//! Fetch-Render-Poll unit: fetch one data domain, render it into one container
//! with a single write, and repeat on an interval until aborted.

use futures::future::{AbortHandle, Abortable, LocalBoxFuture};
use std::cell::{Cell, RefCell};
use std::future::Future;
use std::rc::Rc;
use std::time::Duration;

use crate::domain::errors::{AppError, AppResult};
use crate::domain::logging::{LogComponent, LogLevel, LogRecord, emit};

/// Turns fetched data into markup. Empty and error states are part of the contract.
pub trait Presenter<T> {
    fn present(&self, data: &T) -> String;

    fn is_empty(&self, _data: &T) -> bool {
        false
    }

    fn empty(&self) -> String {
        String::new()
    }

    fn error(&self, err: &AppError) -> String;
}

/// A container that receives the whole rendered fragment at once.
pub trait RenderTarget {
    fn write(&self, markup: &str);
}

/// Where a unit delivers its results.
pub trait UnitView<T> {
    fn show(&self, data: &T);
    fn fail(&self, err: &AppError);
}

pub type Fetcher<T> = Rc<dyn Fn() -> LocalBoxFuture<'static, AppResult<T>>>;
pub type Timer = Rc<dyn Fn(Duration) -> LocalBoxFuture<'static, ()>>;
type Hook<T> = Rc<dyn Fn(&T)>;

/// Presenter + target pair, plus optional hooks run after a successful render.
pub struct Rendered<T> {
    presenter: Rc<dyn Presenter<T>>,
    target: Rc<dyn RenderTarget>,
    after: RefCell<Vec<Hook<T>>>,
}

impl<T> Rendered<T> {
    pub fn new(presenter: Rc<dyn Presenter<T>>, target: Rc<dyn RenderTarget>) -> Self {
        Self {
            presenter,
            target,
            after: RefCell::new(Vec::new()),
        }
    }
}

impl<T> UnitView<T> for Rendered<T> {
    fn show(&self, data: &T) {
        let markup = if self.presenter.is_empty(data) {
            self.presenter.empty()
        } else {
            self.presenter.present(data)
        };
        self.target.write(&markup);
        let hooks = self.after.borrow().clone();
        for hook in hooks {
            hook(data);
        }
    }

    fn fail(&self, err: &AppError) {
        self.target.write(&self.presenter.error(err));
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RefreshOutcome {
    Applied,
    Failed(AppError),
    /// A newer refresh started while this one was in flight; the response was dropped.
    Stale,
}

pub struct PollUnit<T> {
    name: &'static str,
    fetch: Fetcher<T>,
    view: Rc<dyn UnitView<T>>,
    rendered: Option<Rc<Rendered<T>>>,
    interval: Option<Duration>,
    stale_guard: bool,
    generation: Rc<Cell<u64>>,
}

impl<T> Clone for PollUnit<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            fetch: self.fetch.clone(),
            view: self.view.clone(),
            rendered: self.rendered.clone(),
            interval: self.interval,
            stale_guard: self.stale_guard,
            generation: self.generation.clone(),
        }
    }
}

impl<T: 'static> PollUnit<T> {
    /// Unit rendering through `presenter` into `target`.
    pub fn new<F, Fut>(
        name: &'static str,
        fetch: F,
        presenter: Rc<dyn Presenter<T>>,
        target: Rc<dyn RenderTarget>,
    ) -> Self
    where
        F: Fn() -> Fut + 'static,
        Fut: Future<Output = AppResult<T>> + 'static,
    {
        let rendered = Rc::new(Rendered::new(presenter, target));
        let mut unit = Self::with_view(name, fetch, rendered.clone());
        unit.rendered = Some(rendered);
        unit
    }

    /// Unit delivering to a custom view (badges, charts without markup).
    pub fn with_view<F, Fut>(name: &'static str, fetch: F, view: Rc<dyn UnitView<T>>) -> Self
    where
        F: Fn() -> Fut + 'static,
        Fut: Future<Output = AppResult<T>> + 'static,
    {
        let fetch: Fetcher<T> = Rc::new(move || -> LocalBoxFuture<'static, AppResult<T>> { Box::pin(fetch()) });
        Self {
            name,
            fetch,
            view,
            rendered: None,
            interval: None,
            stale_guard: crate::config::client_config().stale_guard,
            generation: Rc::new(Cell::new(0)),
        }
    }

    pub fn every(mut self, interval: Duration) -> Self {
        self.interval = Some(interval);
        self
    }

    pub fn stale_guard(mut self, enabled: bool) -> Self {
        self.stale_guard = enabled;
        self
    }

    /// Runs after every successful render, e.g. to feed a chart or mark items read.
    pub fn after_render(self, hook: impl Fn(&T) + 'static) -> Self {
        if let Some(rendered) = &self.rendered {
            rendered.after.borrow_mut().push(Rc::new(hook));
        } else {
            crate::log_warn!(
                LogComponent::Application("PollUnit"),
                "{}: after_render ignored on a unit without markup",
                self.name,
            );
        }
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn interval(&self) -> Option<Duration> {
        self.interval
    }

    /// One fetch-render cycle. Failures are rendered, logged and returned, never raised.
    pub async fn refresh(&self) -> RefreshOutcome {
        let ticket = self.generation.get() + 1;
        self.generation.set(ticket);

        let result = (self.fetch)().await;

        if self.stale_guard && self.generation.get() != ticket {
            crate::log_debug!(
                LogComponent::Application("PollUnit"),
                "{}: dropped response #{} (superseded)",
                self.name,
                ticket,
            );
            return RefreshOutcome::Stale;
        }

        match result {
            Ok(data) => {
                self.view.show(&data);
                RefreshOutcome::Applied
            }
            Err(err) => {
                emit(
                    LogRecord::new(
                        LogLevel::Error,
                        LogComponent::Application("PollUnit"),
                        format!("{}: refresh failed", self.name),
                    )
                    .with_context(err.to_string()),
                );
                self.view.fail(&err);
                RefreshOutcome::Failed(err)
            }
        }
    }

    /// The polling loop as a future plus the handle that cancels it.
    /// Cycles are serialized: the next sleep starts after the previous render.
    pub fn looped(&self, timer: Timer) -> (PollHandle, LocalBoxFuture<'static, ()>) {
        let (handle, registration) = AbortHandle::new_pair();
        let unit = self.clone();
        let body = async move {
            loop {
                unit.refresh().await;
                match unit.interval {
                    Some(interval) => timer(interval).await,
                    None => break,
                }
            }
        };
        let task = Abortable::new(body, registration);
        let name = self.name;
        let future = async move {
            if task.await.is_err() {
                crate::log_debug!(LogComponent::Application("PollUnit"), "{}: loop aborted", name);
            }
        };
        (PollHandle { name, abort: handle }, Box::pin(future))
    }

    /// Spawns the loop on the browser event loop.
    pub fn start(&self) -> PollHandle {
        let (handle, future) = self.looped(browser_timer());
        wasm_bindgen_futures::spawn_local(future);
        handle
    }
}

pub fn browser_timer() -> Timer {
    Rc::new(|interval| Box::pin(gloo_timers::future::sleep(interval)))
}

/// Cancels a running unit loop and its in-flight request.
#[derive(Debug, Clone)]
pub struct PollHandle {
    name: &'static str,
    abort: AbortHandle,
}

impl PollHandle {
    pub fn from_abort_handle(name: &'static str, abort: AbortHandle) -> Self {
        Self { name, abort }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn abort(&self) {
        self.abort.abort();
    }

    pub fn is_aborted(&self) -> bool {
        self.abort.is_aborted()
    }
}

/// Handles owned by one page. Everything is cancelled together on teardown.
#[derive(Default)]
pub struct PageScope {
    handles: RefCell<Vec<PollHandle>>,
}

impl PageScope {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// Adds a handle. Handles that are already stopped or finished are dropped here.
    pub fn track(&self, handle: PollHandle) -> PollHandle {
        let mut handles = self.handles.borrow_mut();
        handles.retain(|tracked| !tracked.is_aborted());
        handles.push(handle.clone());
        handle
    }

    /// Wraps a side task (single fetch, chained load) so teardown cancels it.
    /// On completion the task retires its own handle.
    pub fn side_task(
        &self,
        name: &'static str,
        task: impl Future<Output = ()> + 'static,
    ) -> LocalBoxFuture<'static, ()> {
        let (abort, registration) = AbortHandle::new_pair();
        self.track(PollHandle::from_abort_handle(name, abort.clone()));
        Box::pin(async move {
            let _ = Abortable::new(task, registration).await;
            abort.abort();
        })
    }

    pub fn spawn(&self, name: &'static str, task: impl Future<Output = ()> + 'static) {
        wasm_bindgen_futures::spawn_local(self.side_task(name, task));
    }

    pub fn len(&self) -> usize {
        self.handles.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.borrow().is_empty()
    }

    pub fn cancel_all(&self) {
        let handles: Vec<PollHandle> = self.handles.borrow_mut().drain(..).collect();
        for handle in &handles {
            handle.abort();
        }
        if !handles.is_empty() {
            crate::log_info!(LogComponent::Application("PageScope"), "🛑 cancelled {} unit(s)", handles.len());
        }
    }
}

impl Drop for PageScope {
    fn drop(&mut self) {
        for handle in self.handles.get_mut().drain(..) {
            handle.abort();
        }
    }
}
