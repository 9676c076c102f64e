//! Engine reuse keyed by language set

use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

use super::engine::{EngineError, EngineFactory, EngineOptions, OcrEngine};

/// Wraps a factory and hands out one engine per distinct [`EngineOptions`]
pub struct CachingEngineFactory<F> {
    inner: F,
    engines: Mutex<HashMap<EngineOptions, Arc<dyn OcrEngine>>>,
}

impl<F: EngineFactory> CachingEngineFactory<F> {
    pub fn new(inner: F) -> Self {
        Self {
            inner,
            engines: Mutex::new(HashMap::new()),
        }
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.engines.lock().len()
    }
}

impl<F: EngineFactory> EngineFactory for CachingEngineFactory<F> {
    fn create(&self, options: &EngineOptions) -> Result<Arc<dyn OcrEngine>, EngineError> {
        // Held across creation so two requests for the same languages load once
        let mut engines = self.engines.lock();
        if let Some(engine) = engines.get(options) {
            debug!("Reusing cached engine for [{}]", options.languages);
            return Ok(engine.clone());
        }

        let engine = self.inner.create(options)?;
        engines.insert(options.clone(), engine.clone());
        Ok(engine)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Accelerator;
    use crate::languages::LanguageSet;
    use crate::vision::region::BoundingRegion;
    use std::path::Path;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct NoopEngine;

    impl OcrEngine for NoopEngine {
        fn detect_and_recognize(&self, _image_path: &Path) -> Result<Vec<BoundingRegion>, EngineError> {
            Ok(vec![])
        }
    }

    #[derive(Default)]
    struct CountingFactory {
        created: AtomicUsize,
        fail: bool,
    }

    impl EngineFactory for &CountingFactory {
        fn create(&self, _options: &EngineOptions) -> Result<Arc<dyn OcrEngine>, EngineError> {
            self.created.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(EngineError::Launch("no python".to_string()));
            }
            Ok(Arc::new(NoopEngine))
        }
    }

    fn options(codes: &[&str]) -> EngineOptions {
        EngineOptions {
            languages: LanguageSet::parse(codes).unwrap(),
            accelerator: Accelerator::Auto,
        }
    }

    #[test]
    fn test_engines_are_reused_per_language_set() {
        let counter = CountingFactory::default();
        let cache = CachingEngineFactory::new(&counter);

        let a = cache.create(&options(&["en"])).unwrap();
        let b = cache.create(&options(&["en"])).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(counter.created.load(Ordering::SeqCst), 1);

        cache.create(&options(&["fr", "en"])).unwrap();
        assert_eq!(counter.created.load(Ordering::SeqCst), 2);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_failures_are_not_cached() {
        let counter = CountingFactory {
            fail: true,
            ..Default::default()
        };
        let cache = CachingEngineFactory::new(&counter);

        assert!(cache.create(&options(&["en"])).is_err());
        assert!(cache.create(&options(&["en"])).is_err());
        assert_eq!(counter.created.load(Ordering::SeqCst), 2);
        assert_eq!(cache.len(), 0);
    }
}
