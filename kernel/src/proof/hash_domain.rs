//! Domain separators for [`super::hash::canonical_hash`].
//!
//! Each digest kind (graph, trace, path, scenario, report, bench guard) gets
//! its own prefix so equal payloads of different kinds never collide. The
//! list below is the only place the prefixes are written down.

/// Expands one `Variant => b"..."` list into the enum, its byte table, `ALL`
/// and `Display`.
macro_rules! define_hash_domains {
    (
        $(
            $(#[$meta:meta])*
            $variant:ident => $bytes:expr
        ),+ $(,)?
    ) => {
        /// What a digest is a digest of.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum HashDomain {
            $(
                $(#[$meta])*
                $variant,
            )+
        }

        impl HashDomain {
            /// Prefix fed to the hasher ahead of the payload.
            #[must_use]
            pub const fn as_bytes(&self) -> &'static [u8] {
                match self {
                    $( Self::$variant => $bytes, )+
                }
            }

            /// Every domain, in declaration order.
            pub const ALL: &[HashDomain] = &[
                $( Self::$variant, )+
            ];
        }

        impl core::fmt::Display for HashDomain {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(match self {
                    $( Self::$variant => stringify!($variant), )+
                })
            }
        }
    };
}

define_hash_domains! {
    /// `GraphSnapshotV1` canonical bytes.
    GraphSnapshot => b"TILEPATH::GRAPH_SNAPSHOT::V1\0",
    /// `SearchTraceV1` canonical bytes.
    SearchTrace => b"TILEPATH::SEARCH_TRACE::V1\0",
    /// A reconstructed path.
    SearchPath => b"TILEPATH::SEARCH_PATH::V1\0",
    /// A parsed `ScenarioV1`.
    ScenarioConfig => b"TILEPATH::SCENARIO_CONFIG::V1\0",
    /// The timing-free part of a scenario report.
    ScenarioReport => b"TILEPATH::SCENARIO_REPORT::V1\0",
    /// Benchmark outcome fingerprint.
    BenchGuard => b"TILEPATH::BENCH_GUARD::V1\0",
}
