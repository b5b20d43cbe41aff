//! App - アプリケーション層
//!
//! ports を組み合わせてエンジンを動かす。
//!
//! # 主要コンポーネント
//! - **DiscoverEngine**: 分類・undo・補充（同期、I/O なし）
//! - **SharedEngine**: 単一の Mutex 境界 + view の配信
//! - **FetchWorker**: intent を CandidateSource / DecisionLedger に届ける

pub mod engine;
pub mod fetch_worker;
pub mod shared;

pub use self::engine::{
    AppendReport, Applied, DiscoverEngine, EngineView, GestureEffect, UndoEffect,
};
pub use self::fetch_worker::FetchWorker;
pub use self::shared::SharedEngine;
