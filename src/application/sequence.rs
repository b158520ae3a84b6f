use futures::future::LocalBoxFuture;
use std::cell::RefCell;
use std::future::Future;
use std::rc::Rc;

use crate::domain::errors::AppResult;

/// A value other units depend on, loaded on first use and cached until refreshed.
/// On the bot detail page the analysis cycle awaits the bot's strategy through this.
pub struct DependencyCell<T> {
    value: RefCell<Option<T>>,
    loader: Rc<dyn Fn() -> LocalBoxFuture<'static, AppResult<T>>>,
}

impl<T: Clone + 'static> DependencyCell<T> {
    pub fn new<F, Fut>(loader: F) -> Rc<Self>
    where
        F: Fn() -> Fut + 'static,
        Fut: Future<Output = AppResult<T>> + 'static,
    {
        Rc::new(Self {
            value: RefCell::new(None),
            loader: Rc::new(move || -> LocalBoxFuture<'static, AppResult<T>> { Box::pin(loader()) }),
        })
    }

    pub fn peek(&self) -> Option<T> {
        self.value.borrow().clone()
    }

    pub fn set(&self, value: T) {
        *self.value.borrow_mut() = Some(value);
    }

    /// Cached value, or the result of loading it now.
    pub async fn get_or_load(&self) -> AppResult<T> {
        if let Some(value) = self.peek() {
            return Ok(value);
        }
        self.reload().await
    }

    /// Always fetches and replaces the cached value on success.
    pub async fn reload(&self) -> AppResult<T> {
        let value = (self.loader)().await?;
        self.set(value.clone());
        Ok(value)
    }
}
