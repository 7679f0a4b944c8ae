use std::collections::BTreeMap;
use std::env;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};
use std::time::SystemTime;

use toml_edit::{Document, Item, Table};

/// Locate an accessible [`syn::Path`] for a `tw_*` crate as seen from the
/// caller's Cargo.toml.
///
/// Generated code must name `tw_schema` in a way that resolves from the
/// crate invoking the derive, whether it depends on `tw_schema` directly or
/// only on the `tagwire` umbrella crate.
///
/// # Example
///
/// ```rust
/// # use tw_macro_utils::Manifest;
/// let p: syn::Path = Manifest::shared(|m| m.get_crate_path("tw_schema"));
/// ```
///
/// # Resolution rules
///
/// 1. If the requested crate is listed in `dependencies`, return `::crate_name`.
/// 2. If the requested crate name begins with `tw_` and the caller depends on
///    `tagwire`, return `::tagwire::short_name` (e.g. `tw_schema` -> `::tagwire::schema`).
/// 3. Repeat steps 1-2 in `dev-dependencies`.
/// 4. Otherwise, fall back to the absolute path `::crate_name`.
///
/// A crate referencing itself (tests inside `tw_schema`) hits rule 4, which
/// works together with `extern crate self as tw_schema;` in its root.
#[derive(Debug)]
pub struct Manifest {
    pub manifest: Document<Box<str>>,
    pub modified_time: SystemTime,
}

const UMBRELLA_NAME: &str = "tagwire";
const CRATE_PREFIX: &str = "tw_";

impl Manifest {
    #[inline(never)]
    fn get_manifest_path() -> PathBuf {
        env::var_os("CARGO_MANIFEST_DIR")
            .map(|path| {
                let mut path = PathBuf::from(path);
                path.push("Cargo.toml");
                assert!(
                    path.exists(),
                    "Cargo manifest does not exist at path {}",
                    path.display(),
                );
                path
            })
            .expect("CARGO_MANIFEST_DIR should be auto-defined by cargo.")
    }

    #[inline(never)]
    fn get_manifest_modified_time(
        cargo_manifest_path: &Path,
    ) -> Result<SystemTime, std::io::Error> {
        std::fs::metadata(cargo_manifest_path).and_then(|metadata| metadata.modified())
    }

    #[inline(never)]
    fn read_manifest(path: &Path) -> Document<Box<str>> {
        let manifest = std::fs::read_to_string(path)
            .unwrap_or_else(|_| panic!("Unable to read cargo manifest: {}", path.display()))
            .into_boxed_str();
        Document::parse(manifest)
            .unwrap_or_else(|_| panic!("Failed to parse cargo manifest: {}", path.display()))
    }

    #[inline]
    fn parse_str<T: syn::parse::Parse>(path: &str) -> T {
        syn::parse_str(path).unwrap()
    }

    fn find_in_deps(deps: &Table, name: &str) -> Option<syn::Path> {
        if deps.contains_key(name) {
            return Some(Self::parse_str(&format!("::{name}")));
        }

        let module = name.strip_prefix(CRATE_PREFIX)?;
        if deps.contains_key(UMBRELLA_NAME) {
            let mut path = Self::parse_str::<syn::Path>(&format!("::{UMBRELLA_NAME}"));
            path.segments.push(Self::parse_str(module));
            return Some(path);
        }
        None
    }

    /// Return a [`syn::Path`] for the package named `name` as resolved from this
    /// crate's Cargo.toml. See the type-level documentation for the rules.
    #[inline(never)]
    pub fn get_crate_path(&self, name: &str) -> syn::Path {
        for table in ["dependencies", "dev-dependencies"] {
            if let Some(Item::Table(deps)) = self.manifest.get(table)
                && let Some(val) = Self::find_in_deps(deps, name)
            {
                return val;
            }
        }

        Self::parse_str(&format!("::{name}"))
    }

    /// Run `func` with the caller's parsed [`Manifest`].
    ///
    /// Manifests are cached per path and re-read when the file's modification
    /// time changes. Invoke this once per macro expansion.
    pub fn shared<R>(func: impl FnOnce(&Self) -> R) -> R {
        static MANIFESTS: RwLock<BTreeMap<PathBuf, Manifest>> = RwLock::new(BTreeMap::new());

        let manifest_path = Self::get_manifest_path();
        let modified_time = Self::get_manifest_modified_time(&manifest_path)
            .expect("The Cargo.toml should have a modified time.");

        let manifests = MANIFESTS.read().unwrap_or_else(PoisonError::into_inner);

        if let Some(manifest) = manifests.get(&manifest_path)
            && manifest.modified_time == modified_time
        {
            return func(manifest);
        }

        drop(manifests);

        let manifest = Manifest {
            manifest: Self::read_manifest(&manifest_path),
            modified_time,
        };

        let result = func(&manifest);

        MANIFESTS
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(manifest_path, manifest);

        result
    }
}

#[cfg(test)]
mod tests {
    use toml_edit::Document;

    use super::Manifest;

    fn manifest(text: &str) -> Manifest {
        Manifest {
            manifest: Document::parse(Box::<str>::from(text)).unwrap(),
            modified_time: std::time::SystemTime::UNIX_EPOCH,
        }
    }

    fn resolve(m: &Manifest, name: &str) -> String {
        let path = m.get_crate_path(name);
        path.segments
            .iter()
            .map(|s| s.ident.to_string())
            .collect::<Vec<_>>()
            .join("::")
    }

    #[test]
    fn direct_dependency_wins() {
        let m = manifest("[dependencies]\ntw_schema = \"0.1\"\ntagwire = \"0.1\"\n");
        assert_eq!(resolve(&m, "tw_schema"), "tw_schema");
    }

    #[test]
    fn umbrella_dependency_is_used() {
        let m = manifest("[dependencies]\ntagwire = \"0.1\"\n");
        assert_eq!(resolve(&m, "tw_schema"), "tagwire::schema");
    }

    #[test]
    fn dev_dependencies_are_searched() {
        let m = manifest("[dev-dependencies]\ntagwire = \"0.1\"\n");
        assert_eq!(resolve(&m, "tw_schema"), "tagwire::schema");
    }

    #[test]
    fn falls_back_to_absolute_path() {
        let m = manifest("[dependencies]\nlog = \"0.4\"\n");
        assert_eq!(resolve(&m, "tw_schema"), "tw_schema");
    }
}
