//! Application orchestration module

pub mod initialization;
pub mod execution;

pub use initialization::{
    load_configuration,
    configure_logging,
    create_colour_manager,
};
pub use execution::{
    drive_panel,
    dump_json,
    run_session,
    SessionReport,
    StopReason,
};
