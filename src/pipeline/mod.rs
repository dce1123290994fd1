//! Pipeline stages for image-to-PDF conversion.
//!
//! Each submodule implements exactly one transformation step.
//! Keeping stages separate makes each independently testable and lets us
//! swap implementations (e.g. a different embedding strategy) without
//! touching other stages.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ probe ──▶ embed ──▶ layout ──▶ assemble
//! (paths)  (headers)  (XObjects) (geometry)  (lopdf)
//! ```
//!
//! 1. [`input`]    — read the selected files and declare their content types
//! 2. [`probe`]    — header-only dimensions/colour facts (no pixel decode)
//! 3. [`embed`]    — declared-type dispatch to PNG decode or JPEG
//!    pass-through, producing image XObject streams
//! 4. [`layout`]   — scale and center each image on its page
//! 5. [`assemble`] — build the lopdf object tree and serialize

pub mod assemble;
pub mod embed;
pub mod input;
pub mod layout;
pub mod probe;
