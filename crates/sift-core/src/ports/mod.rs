//! Ports - 抽象化レイヤー
//!
//! Hexagonal Architecture の「ポート」。エンジンは外部システムを
//! これらの trait 越しにしか触らない。
//!
//! - `ActionDispatcher`: エンジン → 外部の intent 送信口
//! - `CandidateSource`: 候補のページ取得（リモートカーソルを保持）
//! - `DecisionLedger`: liked / seen の記録
//! - `Clock` / `IdGenerator`: intent envelope のメタデータ

pub mod candidate_source;
pub mod clock;
pub mod decision_ledger;
pub mod dispatcher;
pub mod id_generator;

pub use self::candidate_source::CandidateSource;
pub use self::clock::{Clock, FixedClock, SystemClock};
pub use self::decision_ledger::DecisionLedger;
pub use self::dispatcher::ActionDispatcher;
pub use self::id_generator::{IdGenerator, UlidGenerator};
