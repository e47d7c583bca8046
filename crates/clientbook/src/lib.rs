//! `clientbook` - A small client registry with validated forms
//!
//! This library provides field validation, the form state that gates
//! submission, a SQLite-backed client store, and the transfer slot that
//! carries a client from the list view to the edit view.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod app;
pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod form;
pub mod logging;
pub mod notice;
pub mod storage;
pub mod transfer;
pub mod validate;

pub use app::{ClientBook, FormMode, SubmitOutcome, View};
pub use client::{ClientRecord, Field, NewClient};
pub use config::Config;
pub use error::{Error, Result};
pub use form::{BlurOutcome, FieldError, FormState, SubmitControl};
pub use logging::init_logging;
pub use notice::{Alert, Notice, NoticeBoard, NoticeKind, Region};
pub use storage::{ClientRepository, RecordStore, Storage, StorageStats};
pub use transfer::{FileArea, KeyValueArea, MemoryArea, TransferBuffer};
