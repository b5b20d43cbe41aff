//! sift-core
//!
//! Decision queue engine for one-at-a-time candidate triage: a tail-as-top
//! candidate buffer, gesture classification into Like/Seen decisions,
//! single-step undo, and low-water-mark replenishment.
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（ids, decision, intent, events, errors）
//! - **queue**: DiscoverQueue, UndoMemory, ReplenishmentPolicy
//! - **ports**: 抽象化レイヤー（ActionDispatcher, CandidateSource, DecisionLedger, Clock, IdGenerator）
//! - **app**: DiscoverEngine, SharedEngine, FetchWorker
//! - **impls**: 開発用・テスト用の実装
//! - **config**: 設定ファイル + 環境変数

pub mod app;
pub mod config;
pub mod domain;
pub mod impls;
pub mod ports;
pub mod queue;

pub use app::{DiscoverEngine, EngineView, FetchWorker, SharedEngine};
pub use config::SiftConfig;
pub use domain::{CandidateId, Decision, GestureOutcome, InboundEvent, Intent, SiftError};
