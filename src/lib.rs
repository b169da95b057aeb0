// SPDX-License-Identifier: MPL-2.0
//! `sales_lens` is the presentation shell of the Sales ML Analyzer
//! dashboard, built with the Iced GUI framework.
//!
//! It turns server-side outcomes into toast notifications, shows scripted
//! progress while an uploaded sales report is analyzed, and asks for
//! confirmation before destructive actions.

pub mod app;
pub mod diagnostics;
pub mod error;
pub mod i18n;
pub mod ui;
