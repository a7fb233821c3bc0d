use std::cell::RefCell;

use super::core::DeviceConfig;
use super::errors::MemdevError;
use super::watch;

/// Observer hook for the observed parameter. Runs strictly before the new
/// value is committed, so `current` (and any inspection of the store during
/// the call) sees the pre-update value. Watchers observe; they cannot veto
/// the update.
pub trait ParamWatch {
    fn apply(&mut self, name: &str, raw: &str, current: i32) -> ();
}

static OBSERVED_PARAM_NAME: &'static str = "observed_param";

/// The device's two tunables. `plain_param` is a bare store; every accepted
/// update of `observed_param` routes through the registered watchers first.
pub struct ParameterStore {
    plain: i32,
    observed: i32,
    pub watchers: Vec<RefCell<Box<dyn ParamWatch>>>,
}

impl ParameterStore {
    pub fn new(cfg: &DeviceConfig) -> ParameterStore {
        let mut store = ParameterStore {
            plain: cfg.plain_param,
            observed: cfg.observed_param,
            watchers: Vec::with_capacity(2),
        };
        watch::setup(&mut store);
        store.watchers.shrink_to_fit();
        store
    }

    pub fn watch(&mut self, watcher: Box<dyn ParamWatch>) {
        self.watchers.push(RefCell::new(watcher));
    }

    pub fn set_plain(&mut self, value: i32) {
        self.plain = value;
    }

    pub fn plain(&self) -> i32 {
        self.plain
    }

    /// Parses `raw` and commits it as the observed parameter. Watchers run
    /// after a successful parse and before the commit; a parse failure
    /// leaves the stored value untouched and notifies nobody.
    pub fn set_observed(&mut self, raw: &str) -> Result<(), MemdevError> {
        let parsed = raw
            .trim()
            .parse::<i32>()
            .map_err(|_| MemdevError::Parse(raw.to_string()))?;
        for watcher in self.watchers.iter() {
            watcher
                .borrow_mut()
                .apply(OBSERVED_PARAM_NAME, raw, self.observed);
        }
        self.observed = parsed;
        Ok(())
    }

    pub fn observed(&self) -> i32 {
        self.observed
    }

    pub fn get_observed(&self) -> String {
        self.observed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;

    struct RecordingWatch {
        seen: Rc<RefCell<Vec<(String, String, i32)>>>,
    }

    impl ParamWatch for RecordingWatch {
        fn apply(&mut self, name: &str, raw: &str, current: i32) -> () {
            self.seen
                .borrow_mut()
                .push((name.to_string(), raw.to_string(), current));
        }
    }

    fn store_with_recorder() -> (ParameterStore, Rc<RefCell<Vec<(String, String, i32)>>>) {
        let mut store = ParameterStore::new(&DeviceConfig::default());
        let seen = Rc::new(RefCell::new(Vec::new()));
        store.watch(Box::new(RecordingWatch { seen: seen.clone() }));
        (store, seen)
    }

    #[test]
    fn defaults_from_config() {
        let store = ParameterStore::new(&DeviceConfig::default());
        assert_eq!(store.plain(), 1);
        assert_eq!(store.observed(), 2);
        assert_eq!(store.get_observed(), "2");
    }

    #[test]
    fn plain_set_does_not_notify() {
        let (mut store, seen) = store_with_recorder();
        store.set_plain(9);
        assert_eq!(store.plain(), 9);
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn observed_set_notifies_once_with_pre_update_value() -> Result<(), MemdevError> {
        let (mut store, seen) = store_with_recorder();
        store.set_observed("5")?;
        let seen = seen.borrow();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0], ("observed_param".to_string(), "5".to_string(), 2));
        assert_eq!(store.observed(), 5);
        Ok(())
    }

    #[test]
    fn observed_accepts_surrounding_whitespace() -> Result<(), MemdevError> {
        let (mut store, _) = store_with_recorder();
        store.set_observed(" -7\n")?;
        assert_eq!(store.observed(), -7);
        assert_eq!(store.get_observed(), "-7");
        Ok(())
    }

    #[test]
    fn malformed_input_fails_and_leaves_value() {
        let (mut store, seen) = store_with_recorder();
        match store.set_observed("abc") {
            Err(MemdevError::Parse(raw)) => assert_eq!(raw, "abc"),
            other => panic!("expected Parse error, got {:?}", other),
        }
        assert_eq!(store.observed(), 2);
        assert!(seen.borrow().is_empty());
    }
}
