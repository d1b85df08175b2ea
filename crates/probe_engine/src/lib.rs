//! Probe engine: IO pipeline for endpoint validation.
mod catalog;
mod classify;
mod decode;
mod engine;
mod fetch;
mod filename;
mod icons;
mod probe;
mod snapshot;

pub use catalog::{build_tasks, load_catalog, Catalog, CatalogEntry, CatalogError};
pub use classify::ParsabilityClassifier;
pub use decode::{decode_body, DecodedBody};
pub use engine::{
    ChannelVerdictSink, EngineConfig, EngineError, EngineEvent, RunReport, ValidationEngine,
    VerdictSink, DEFAULT_WORKER_COUNT,
};
pub use fetch::{
    ClientError, ProbeResponse, ProbeSettings, Prober, ReqwestProber, TransportError,
};
pub use filename::{icon_filename, sanitize_name, snapshot_filename};
pub use icons::{download_icons, favicon_url, IconError, IconReport};
pub use probe::probe_endpoint;
pub use snapshot::{PersistError, SnapshotSink, SnapshotStore};
