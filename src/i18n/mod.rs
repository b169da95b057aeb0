// SPDX-License-Identifier: MPL-2.0
//! Localized UI strings backed by Fluent.
//!
//! Translations live in `assets/i18n/<locale>.ftl` and are embedded at
//! build time. English (`en-US`) and Indonesian (`id`) are bundled.
//!
//! The locale is chosen from, in order: the `--lang` flag, the
//! `[general] language` setting, then the OS locale. A key missing from the
//! selected locale falls back to English before being reported as missing.

pub mod fluent;

pub use fluent::I18n;
