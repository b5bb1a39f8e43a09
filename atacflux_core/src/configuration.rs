//! Process-wide defaults used by the flux solver
use std::sync::{LazyLock, RwLock};

pub static CONFIGURATION: LazyLock<RwLock<Configuration>> =
    LazyLock::new(|| RwLock::new(Configuration::default()));

#[derive(Clone, Debug, PartialEq)]
pub struct Configuration {
    /// Flux entering the pathway at the input metabolite
    pub input_flux: f64,
    /// Tolerance used when checking flux conservation
    pub tolerance: f64,
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration {
            input_flux: 1.0,
            tolerance: 1e-09,
        }
    }
}

/// Read the current configuration, falling back to the defaults if the lock is poisoned
pub fn current() -> Configuration {
    read_or_default(&CONFIGURATION)
}

fn read_or_default(lock: &RwLock<Configuration>) -> Configuration {
    match lock.read() {
        Ok(config) => config.clone(),
        // A writer panicked, the stored values may be half updated
        Err(_) => Configuration::default(),
    }
}

#[cfg(test)]
mod configuration_tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Configuration::default();
        assert!((config.input_flux - 1.0).abs() < 1e-25);
        assert!(config.tolerance > 0.0 && config.tolerance < 1e-6);
    }

    #[test]
    fn poisoned_lock_reads_defaults() {
        let lock = RwLock::new(Configuration::default());
        let result = std::thread::scope(|s| {
            s.spawn(|| {
                let mut config = lock.write().unwrap();
                config.input_flux = 2.0;
                panic!("writer failed mid update");
            })
            .join()
        });
        assert!(result.is_err());
        assert!(lock.is_poisoned());
        assert_eq!(read_or_default(&lock), Configuration::default());
    }

    #[test]
    fn healthy_lock_reads_stored_values() {
        let lock = RwLock::new(Configuration {
            input_flux: 2.0,
            tolerance: 1e-6,
        });
        assert!((read_or_default(&lock).input_flux - 2.0).abs() < 1e-25);
    }
}
