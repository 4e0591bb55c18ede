use std::collections::BTreeSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// 1回の実行で処理済みとなったパッケージ名の集合
///
/// 名前は初めて解決に成功した時点で一度だけ追加され、実行中に削除されることはない。
/// この型自体はスレッドセーフではないため、並行解決時は [`SharedProcessedSet`] を使う。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessedSet {
    names: BTreeSet<String>,
}

impl ProcessedSet {
    /// 空のProcessedSetを作成
    pub fn new() -> Self {
        Self::default()
    }

    /// 処理済みかどうか
    pub fn seen(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// 処理済みとして記録する。新たに追加された場合はtrue
    pub fn mark_seen(&mut self, name: impl Into<String>) -> bool {
        self.names.insert(name.into())
    }

    /// 処理済みパッケージ数
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// 空かどうか
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// 実行終了時に表示するサマリー行
    pub fn summarize(&self) -> String {
        format!("{} packages have been processed.", self.names.len())
    }
}

/// 並行解決間で共有されるProcessedSet
///
/// すべての読み書きはミューテックスで直列化される。
#[derive(Debug, Clone, Default)]
pub struct SharedProcessedSet {
    inner: Arc<Mutex<ProcessedSet>>,
}

impl SharedProcessedSet {
    /// 空のSharedProcessedSetを作成
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, ProcessedSet> {
        // A panic while holding the lock cannot leave the set half-updated.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// 処理済みかどうか
    pub fn seen(&self, name: &str) -> bool {
        self.lock().seen(name)
    }

    /// 未処理なら処理済みとして記録しtrueを返す（チェックと記録はアトミック）
    pub fn claim(&self, name: &str) -> bool {
        let mut set = self.lock();
        if set.seen(name) {
            return false;
        }
        set.mark_seen(name)
    }

    /// 処理済みパッケージ数
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// 空かどうか
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// 現時点のスナップショット
    pub fn snapshot(&self) -> ProcessedSet {
        self.lock().clone()
    }

    /// 実行終了時に表示するサマリー行
    pub fn summarize(&self) -> String {
        self.lock().summarize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_mark_seen_only_once() {
        let mut set = ProcessedSet::new();
        assert!(!set.seen("a"));
        assert!(set.mark_seen("a"));
        assert!(!set.mark_seen("a"));
        assert!(set.seen("a"));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_summarize_two_packages() {
        let mut set = ProcessedSet::new();
        set.mark_seen("first");
        set.mark_seen("second");
        assert_eq!(set.summarize(), "2 packages have been processed.");
    }

    #[test]
    fn test_summarize_empty_set() {
        assert_eq!(
            ProcessedSet::new().summarize(),
            "0 packages have been processed."
        );
    }

    #[test]
    fn test_shared_claim_is_exclusive_across_threads() {
        let shared = SharedProcessedSet::new();
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let shared = shared.clone();
                std::thread::spawn(move || shared.claim("contended"))
            })
            .collect();

        let winners = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|claimed| *claimed)
            .count();

        assert_eq!(winners, 1);
        assert_eq!(shared.len(), 1);
        assert_eq!(shared.summarize(), "1 packages have been processed.");
    }

    #[test]
    fn test_shared_snapshot_is_detached() {
        let shared = SharedProcessedSet::new();
        shared.claim("a");
        let snapshot = shared.snapshot();
        shared.claim("b");

        assert_eq!(snapshot.len(), 1);
        assert!(shared.seen("b"));
        assert!(!snapshot.seen("b"));
    }
}
