//! Operation identifiers and credential-tier classification.

use axum::http::Method;

/// Every operation the cache serves, identified from method and path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    GetCacheInfo,
    HeadNarInfo,
    GetNarInfo,
    PutNarInfo,
    HeadNar,
    GetNar,
    PutNar,
    GetBuildLog,
    GetFileListing,
}

/// Credential tier required by an operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthTier {
    /// No credentials required even when authentication is configured.
    Open,
    /// Either the read or the write pair must match.
    Read,
    /// The write pair must match exactly.
    Write,
}

impl Operation {
    /// Classify a request. Returns `None` for paths outside the API surface,
    /// which fall through to a plain 404.
    pub fn classify(method: &Method, path: &str) -> Option<Self> {
        if path == "/nix-cache-info" {
            return (method == Method::GET).then_some(Self::GetCacheInfo);
        }

        if let Some(rest) = path.strip_prefix("/nar/") {
            if rest.is_empty() || rest.contains('/') {
                return None;
            }
            return if *method == Method::GET {
                Some(Self::GetNar)
            } else if *method == Method::HEAD {
                Some(Self::HeadNar)
            } else if *method == Method::PUT {
                Some(Self::PutNar)
            } else {
                None
            };
        }

        if let Some(rest) = path.strip_prefix("/log/") {
            if rest.is_empty() {
                return None;
            }
            return (method == Method::GET).then_some(Self::GetBuildLog);
        }

        let rest = path.strip_prefix('/')?;
        if rest.contains('/') {
            return None;
        }
        if rest.ends_with(".narinfo") {
            return if *method == Method::GET {
                Some(Self::GetNarInfo)
            } else if *method == Method::HEAD {
                Some(Self::HeadNarInfo)
            } else if *method == Method::PUT {
                Some(Self::PutNarInfo)
            } else {
                None
            };
        }
        if rest.ends_with(".ls") {
            return (method == Method::GET).then_some(Self::GetFileListing);
        }

        None
    }

    /// Stable identifier used in logs.
    pub fn name(self) -> &'static str {
        match self {
            Self::GetCacheInfo => "GetCacheInfo",
            Self::HeadNarInfo => "HeadNarInfo",
            Self::GetNarInfo => "GetNarInfo",
            Self::PutNarInfo => "PutNarInfo",
            Self::HeadNar => "HeadNar",
            Self::GetNar => "GetNar",
            Self::PutNar => "PutNar",
            Self::GetBuildLog => "GetBuildLog",
            Self::GetFileListing => "GetFileListing",
        }
    }

    /// Credential tier for this operation. The two uploads form the write
    /// set; everything else guarded accepts either pair.
    pub fn tier(self) -> AuthTier {
        match self {
            Self::GetCacheInfo => AuthTier::Open,
            Self::PutNar | Self::PutNarInfo => AuthTier::Write,
            _ => AuthTier::Read,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_the_full_surface() {
        let cases = [
            (Method::GET, "/nix-cache-info", Operation::GetCacheInfo),
            (Method::HEAD, "/aaaa.narinfo", Operation::HeadNarInfo),
            (Method::GET, "/aaaa.narinfo", Operation::GetNarInfo),
            (Method::PUT, "/aaaa.narinfo", Operation::PutNarInfo),
            (Method::HEAD, "/nar/ff.nar.xz", Operation::HeadNar),
            (Method::GET, "/nar/ff.nar.xz", Operation::GetNar),
            (Method::PUT, "/nar/ff.nar.xz", Operation::PutNar),
            (Method::GET, "/log/some-deriver", Operation::GetBuildLog),
            (Method::GET, "/aaaa.ls", Operation::GetFileListing),
        ];
        for (method, path, expected) in cases {
            assert_eq!(
                Operation::classify(&method, path),
                Some(expected),
                "{method} {path}"
            );
        }
    }

    #[test]
    fn unknown_paths_are_unclassified() {
        assert_eq!(Operation::classify(&Method::GET, "/"), None);
        assert_eq!(Operation::classify(&Method::GET, "/nar/"), None);
        assert_eq!(Operation::classify(&Method::GET, "/nar/a/b"), None);
        assert_eq!(Operation::classify(&Method::GET, "/log/"), None);
        assert_eq!(Operation::classify(&Method::DELETE, "/aaaa.narinfo"), None);
        assert_eq!(Operation::classify(&Method::GET, "/random"), None);
    }

    #[test]
    fn write_set_is_exactly_the_two_uploads() {
        for op in [
            Operation::GetCacheInfo,
            Operation::HeadNarInfo,
            Operation::GetNarInfo,
            Operation::PutNarInfo,
            Operation::HeadNar,
            Operation::GetNar,
            Operation::PutNar,
            Operation::GetBuildLog,
            Operation::GetFileListing,
        ] {
            let expected = match op {
                Operation::PutNar | Operation::PutNarInfo => AuthTier::Write,
                Operation::GetCacheInfo => AuthTier::Open,
                _ => AuthTier::Read,
            };
            assert_eq!(op.tier(), expected, "{op:?}");
        }
    }
}
