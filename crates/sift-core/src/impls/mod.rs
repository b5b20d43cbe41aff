//! Impls - ports の実装（開発用・テスト用）
//!
//! # 含まれる実装
//! - **RecordingDispatcher**: intent を記録するだけ（テスト用）
//! - **ChannelDispatcher**: intent を mpsc で FetchWorker に流す
//! - **InMemoryCandidateSource**: ランダム discover を模したカタログ
//! - **InMemoryDecisionLedger**: liked / seen リスト

pub mod channel;
pub mod mem_ledger;
pub mod mem_source;
pub mod recording;

pub use self::channel::ChannelDispatcher;
pub use self::mem_ledger::InMemoryDecisionLedger;
pub use self::mem_source::{DiscoverCursor, InMemoryCandidateSource};
pub use self::recording::RecordingDispatcher;
