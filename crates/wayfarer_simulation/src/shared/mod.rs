//! Shared domain - cross-cutting компоненты
//!
//! Содержит компоненты используемые в нескольких доменах:
//! - Attachment - визуальный инстанс оружия (точка крепления из Hand::attachment_point)
//! - Presentation (AnimationCues, AnimationParameters) - outbox для host-движка

pub mod attachment;
pub mod presentation;

pub use attachment::*;
pub use presentation::*;
