//! Declarative macros for ergonomic effect construction

/// Create an `Effect::Future` from an async block
///
/// # Example
///
/// ```rust,ignore
/// use pd_registration_core::async_effect;
///
/// async_effect! {
///     let counts = source.fetch_counts().await.ok()?;
///     Some(WizardAction::EnrollmentLoaded { counts })
/// }
/// ```
#[macro_export]
macro_rules! async_effect {
    ($($body:tt)*) => {
        $crate::effect::Effect::Future(
            ::std::boxed::Box::pin(async move { $($body)* })
        )
    };
}
