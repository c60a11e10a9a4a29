// Copyright 2026 the FloatCanvas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! FloatCanvas Event State: small state machines for canvas pointer input.
//!
//! Each module handles one interaction pattern that needs state carried
//! across several pointer events:
//!
//! - [`hover`]: Track the object under the mouse and produce enter/leave
//!   transitions exactly once per change.
//! - [`drag`]: Track a press‑drag‑release gesture in device pixels, with
//!   movement deltas, total offsets, and the dragged rectangle.
//!
//! The managers are generic over the caller's object handle type and do not
//! assume any particular hit‑testing strategy. A canvas resolves "what is
//! under the pointer" however it likes (for example via a colour‑keyed hit
//! bitmap) and feeds the answer in.
//!
//! ## Hover Tracking
//!
//! ```rust
//! use floatcanvas_event_state::hover::{HoverEvent, HoverState};
//!
//! let mut hover = HoverState::new();
//!
//! // Pointer moves onto object 7.
//! assert_eq!(hover.update(Some(7)).enter, Some(7));
//! // Still over 7: nothing fires.
//! assert!(hover.update(Some(7)).is_empty());
//! // Straight onto object 9.
//! let t = hover.update(Some(9));
//! let mut order = t.iter();
//! assert_eq!(order.next(), Some(HoverEvent::Leave(7)));
//! assert_eq!(order.next(), Some(HoverEvent::Enter(9)));
//! // Off every object.
//! assert_eq!(hover.update(None).leave, Some(9));
//! ```
//!
//! ## Drag Operations
//!
//! ```rust
//! use kurbo::Point;
//! use floatcanvas_event_state::drag::DragState;
//!
//! let mut drag = DragState::default();
//! drag.start(Point::new(10.0, 10.0));
//!
//! let delta = drag.update(Point::new(15.0, 12.0)).unwrap();
//! assert_eq!((delta.x, delta.y), (5.0, 2.0));
//!
//! let rect = drag.rect_to(Point::new(4.0, 30.0)).unwrap();
//! assert_eq!((rect.x0, rect.y0, rect.x1, rect.y1), (4.0, 10.0, 10.0, 30.0));
//! ```
//!
//! This crate is `no_std`.

#![no_std]

pub mod drag;
pub mod hover;
