pub type HashSet<V> = rustc_hash::FxHashSet<V>;
