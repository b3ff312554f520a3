pub mod directive;
pub mod escape;
pub mod snippet;

use settings::{OptionStore, Settings};
use tracing::warn;

pub use directive::Directive;
pub use escape::{escape_js, escape_url, host_of};
pub use snippet::{plan, Snippet};

pub fn compose(settings: &Settings) -> String {
    plan(settings).render()
}

pub fn compose_from_store(store: &dyn OptionStore) -> String {
    match Settings::load(store) {
        Ok(settings) => compose(&settings),
        Err(err) => {
            warn!(error = %err, "could not read settings, tracking code skipped");
            String::new()
        }
    }
}
