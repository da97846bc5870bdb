// Copyright 2026 the Scrim Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Custom window chrome with non-client frame emulation and backdrop
//! materials.
//!
//! `scrim_core` renders an acrylic-style translucent material behind a
//! borderless top-level window while keeping native behaviors: resize
//! borders, title bar dragging, maximize, snap, DPI scaling, the system
//! menu and auto-hide taskbar awareness. It is `no_std` compatible (with
//! `alloc`) and talks to the platform exclusively through two capability
//! traits, so the same frame logic runs against any windowing system and
//! compositor pair.
//!
//! # Architecture
//!
//! One [`WindowFrame`](window::WindowFrame) per window sits between the two
//! capability traits and advances everything per host event:
//!
//! ```text
//!   WindowHost (native messages)
//!       │
//!       ▼
//!   HostEvent ──► WindowFrame::handle() ──► EventReply
//!                     │
//!         ┌───────────┼──────────────┐
//!         ▼           ▼              ▼
//!   WindowModel   MaterialGraph   CompositionSurface
//!   (+ metrics)   (effect DAG)    (backend target)
//!         │           │              │
//!         └───────────┴──────────────┘
//!                     ▼
//!             RenderBackend (compositor)
//! ```
//!
//! **[`window`]** — The [`WindowModel`](window::WindowModel), the host
//! event vocabulary, pure non-client geometry (client area calculation and
//! hit testing) and the [`WindowFrame`](window::WindowFrame) state machine
//! tying it all together.
//!
//! **[`metrics`]** — DPI scaling of host baseline metrics into resize
//! border, caption, title bar and frame margin sizes, with documented
//! fallbacks when the host cannot answer.
//!
//! **[`theme`]** — Light/Dark/HighContrast resolution from host signals and
//! the per-theme material parameter presets, with per-window overrides.
//!
//! **[`graph`]** — The acrylic effect graph model: struct-of-arrays node
//! storage, the luminosity and legacy tint topologies, realization against
//! a backend and idempotent reparametrization through dirty tracking.
//!
//! **[`surface`]** — The composition target below the title bar; resize,
//! rescale and present.
//!
//! **[`dragsink`]** — The transparent child window over the title bar that
//! reclaims pointer messages the composited content would swallow.
//!
//! **[`host`]** / **[`backend`]** — The [`WindowHost`](host::WindowHost)
//! and [`RenderBackend`](backend::RenderBackend) capability traits this
//! crate consumes but never implements.
//!
//! **[`dirty`]** — Dirty channel definitions for the effect graph, via
//! `understory_dirty`.
//!
//! **[`trace`]** — [`TraceSink`](trace::TraceSink) trait and event types
//! for frame instrumentation, with the zero-overhead
//! [`Tracer`](trace::Tracer) wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one
//!   branch per call site).
//! - `trace-rich` (disabled by default, implies `trace`): Gates per-node
//!   realization and parameter push events.

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod backend;
pub mod color;
pub mod dirty;
pub mod dragsink;
pub mod geometry;
pub mod graph;
pub mod host;
pub mod metrics;
pub mod surface;
pub mod theme;
pub mod trace;
pub mod window;
