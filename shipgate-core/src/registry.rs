use std::{collections::HashMap, sync::Arc};

use secrecy::SecretString;
use tracing::warn;

use crate::carrier::Carrier;
use crate::config::Config;
use crate::providers::swift::SwiftCarrier;
use crate::providers::xps::XpsCarrier;

/// Registry of concrete carrier instances by id.
/// Built once at process start from configuration and read-only afterwards;
/// nothing is added or removed while dispatches run.
///
/// An id may be registered WITHOUT a capability (carrier declared in config
/// but disabled, or missing its credentials). Such ids still resolve into
/// the job set; the engine skips them silently instead of failing.
#[derive(Default)]
pub struct CarrierRegistry {
    carriers: HashMap<String, Option<Arc<dyn Carrier>>>,
}

impl CarrierRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from configuration. Carrier sections that are absent
    /// are simply not registered; sections that are present but disabled (or
    /// missing their secret) are registered as capability-less placeholders.
    pub fn from_config(cfg: &Config) -> Self {
        let mut reg = Self::new();

        if let Some(swift) = &cfg.carriers.swift {
            if swift.enabled {
                reg.register(
                    "swift",
                    Arc::new(SwiftCarrier::new(
                        swift.endpoint.clone(),
                        swift.account_number,
                    )),
                );
            } else {
                reg.register_placeholder("swift");
            }
        }

        if let Some(xps) = &cfg.carriers.xps {
            if !xps.enabled {
                reg.register_placeholder("xps");
            } else {
                match std::env::var(&xps.password_env) {
                    Ok(password) => reg.register(
                        "xps",
                        Arc::new(XpsCarrier::new(
                            xps.endpoint.clone(),
                            xps.username.clone(),
                            SecretString::new(password.into()),
                            xps.account_no.clone(),
                        )),
                    ),
                    Err(_) => {
                        warn!(
                            env = %xps.password_env,
                            "xps password env var not set; carrier registered without capability"
                        );
                        reg.register_placeholder("xps");
                    }
                }
            }
        }

        reg
    }

    pub fn register(&mut self, id: impl Into<String>, carrier: Arc<dyn Carrier>) {
        self.carriers.insert(id.into(), Some(carrier));
    }

    /// Reserve an id with no capability; its jobs will be skipped.
    pub fn register_placeholder(&mut self, id: impl Into<String>) {
        self.carriers.insert(id.into(), None);
    }

    pub fn contains(&self, id: &str) -> bool {
        self.carriers.contains_key(id)
    }

    /// Capability for a registered id; None when the id is a placeholder OR
    /// unknown — pair with `contains` to tell the two apart.
    pub fn capability(&self, id: &str) -> Option<Arc<dyn Carrier>> {
        self.carriers.get(id).and_then(|c| c.clone())
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, Option<Arc<dyn Carrier>>)> {
        self.carriers
            .iter()
            .map(|(id, carrier)| (id.as_str(), carrier.clone()))
    }

    pub fn len(&self) -> usize {
        self.carriers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.carriers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Carriers, DatabaseCfg, HttpCfg, ServerCfg, SwiftCfg, XpsCfg};

    fn cfg_with(carriers: Carriers) -> Config {
        Config {
            server: ServerCfg::default(),
            database: DatabaseCfg {
                url: "postgres://localhost/shipgate".into(),
                max_connections: 5,
                acquire_timeout_ms: 5_000,
            },
            carriers,
            http: HttpCfg::default(),
        }
    }

    #[test]
    fn builds_enabled_carriers_from_config() {
        let cfg = cfg_with(Carriers {
            swift: Some(SwiftCfg {
                endpoint: "http://localhost:3030/v1/swift".into(),
                account_number: 123,
                enabled: true,
            }),
            xps: None,
        });
        let reg = CarrierRegistry::from_config(&cfg);
        assert_eq!(reg.len(), 1);
        assert!(reg.contains("swift"));
        let swift = reg.capability("swift").unwrap();
        assert_eq!(swift.endpoint(), "http://localhost:3030/v1/swift");
        assert!(!reg.contains("xps"));
    }

    #[test]
    fn disabled_carrier_becomes_a_placeholder() {
        let cfg = cfg_with(Carriers {
            swift: Some(SwiftCfg {
                endpoint: "http://localhost:3030/v1/swift".into(),
                account_number: 123,
                enabled: false,
            }),
            xps: None,
        });
        let reg = CarrierRegistry::from_config(&cfg);
        assert!(reg.contains("swift"));
        assert!(reg.capability("swift").is_none());
    }

    #[test]
    fn xps_without_its_password_env_becomes_a_placeholder() {
        let cfg = cfg_with(Carriers {
            swift: None,
            xps: Some(XpsCfg {
                endpoint: "http://localhost:3031/v1/xps".into(),
                username: "shipgate".into(),
                password_env: "SHIPGATE_TEST_XPS_PASSWORD_DEFINITELY_UNSET".into(),
                account_no: "ACC-1".into(),
                enabled: true,
            }),
        });
        let reg = CarrierRegistry::from_config(&cfg);
        assert!(reg.contains("xps"));
        assert!(reg.capability("xps").is_none());
    }

    #[test]
    fn unknown_id_is_neither_contained_nor_capable() {
        let reg = CarrierRegistry::new();
        assert!(!reg.contains("missing"));
        assert!(reg.capability("missing").is_none());
    }
}
