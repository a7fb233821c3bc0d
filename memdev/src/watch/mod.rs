use super::params::{ParamWatch, ParameterStore};

/// Stock watcher: prints every parameter change the way the original
/// device logged them. Runs before the commit, so `current` is the value
/// about to be replaced.
pub struct StdoutWatch;

impl ParamWatch for StdoutWatch {
    fn apply(&mut self, name: &str, raw: &str, current: i32) -> () {
        println!(
            "[memdev] parameter {} changing: input = {:?}, current value = {}",
            name, raw, current
        );
    }
}

pub fn setup(store: &mut ParameterStore) {
    store.watch(Box::new(StdoutWatch));
}
