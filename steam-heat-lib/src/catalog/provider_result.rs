use std::sync::Arc;

/// Outcome of asking a secondary source for data about one catalog entry.
#[derive(Debug, Clone)]
pub enum ProviderResult<T> {
    /// The operation succeeded and data was found.
    Found(T),

    /// The source answered, but had nothing usable for this entry.
    Unavailable(Arc<str>),

    /// An error occurred during the operation for this entry.
    Error(Arc<ohno::AppError>),
}

impl<T> ProviderResult<T> {
    /// Consumes the result, keeping the data only if `Found`.
    #[must_use]
    pub fn found(self) -> Option<T> {
        match self {
            Self::Found(data) => Some(data),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ohno::app_err;

    #[test]
    fn test_found_consumes() {
        assert_eq!(ProviderResult::Found(12.5).found(), Some(12.5));
        assert_eq!(ProviderResult::<f64>::Unavailable("empty".into()).found(), None);
        assert_eq!(ProviderResult::<f64>::Error(Arc::new(app_err!("boom"))).found(), None);
    }

    #[test]
    fn test_debug_unavailable() {
        let result: ProviderResult<i32> = ProviderResult::Unavailable("no data".into());
        let debug_str = format!("{result:?}");
        assert!(debug_str.contains("Unavailable"));
        assert!(debug_str.contains("no data"));
    }
}
