use crate::{Renderer, DEFAULT_CAPACITY};
use std::env;

const CAPACITY_VAR: &str = "BITPHOTO_CAPACITY";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// upper bound for every buffer of one cycle
    pub capacity: usize,
    pub renderer: Renderer,
    /// check both inverse transforms against the raw raster
    pub verify: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            capacity: DEFAULT_CAPACITY,
            renderer: Renderer::default(),
            verify: true,
        }
    }
}

impl Config {
    /// Defaults, with the capacity taken from `BITPHOTO_CAPACITY` when set.
    pub fn from_env() -> Self {
        Self::default().with_capacity_var(env::var(CAPACITY_VAR).ok().as_deref())
    }

    fn with_capacity_var(mut self, var: Option<&str>) -> Self {
        match var.map(str::parse::<usize>) {
            Some(Ok(capacity)) if capacity > 0 => {
                debug!("capacity {capacity} from {CAPACITY_VAR}");
                self.capacity = capacity;
            }
            Some(_) => warn!(
                "ignoring {CAPACITY_VAR}={:?}, keeping capacity {}",
                var.unwrap_or_default(),
                self.capacity
            ),
            None => {}
        }
        self
    }
}
