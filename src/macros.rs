/// Generate accessor functions for global signals.
///
/// Usage:
/// `global_signals! {
///     pub fn1 => field1: Type1,
///     fn2 => field2: Type2,
/// }`
#[macro_export]
macro_rules! global_signals {
    ( $( $vis:vis $name:ident => $field:ident : $ty:ty ),+ $(,)? ) => {
        $(
            $vis fn $name() -> ::leptos::RwSignal<$ty> {
                $crate::global_state::globals().$field
            }
        )+
    };
}

/// Look up an element by id or return `AppError::Dom`.
#[macro_export]
macro_rules! require_element {
    ($document:expr, $id:expr) => {
        $document
            .get_element_by_id($id)
            .ok_or_else(|| $crate::domain::errors::AppError::dom(format!("#{} not found", $id)))
    };
}
