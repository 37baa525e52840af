use crate::error::Result;
use crate::scanner::{scan_directory, DirectoryListing};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Stem used for intermediate names.
pub const TEMP_PREFIX: &str = "scramblr-tmp-";

/// How final names are numbered.
///
/// Final names are `{prefix}{index}{extension}` where `index` counts up from
/// `start_index` and is zero-padded to `pad_width` digits (0 = no padding).
/// `start_index + len` must fit in a `usize`; the CLI bounds both fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamingOptions {
    pub start_index: usize,
    pub pad_width: usize,
}

impl Default for NamingOptions {
    fn default() -> Self {
        Self {
            start_index: 0,
            pad_width: 0,
        }
    }
}

impl NamingOptions {
    pub fn final_name(&self, prefix: &str, index: usize, extension: &str) -> String {
        format!(
            "{prefix}{index:0width$}{extension}",
            width = self.pad_width
        )
    }
}

/// One entry of a plan: where a file starts, where it parks, where it lands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedRename {
    pub original: PathBuf,
    pub original_name: String,
    pub temp: PathBuf,
    pub temp_name: String,
    pub target: PathBuf,
    pub final_name: String,
    pub index: usize,
}

/// The full set of renames for one run, computed before anything moves.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RenamePlan {
    pub directory: PathBuf,
    pub prefix: String,
    /// Renames in enumeration order (phase 1 order).
    pub renames: Vec<PlannedRename>,
    /// Positions into `renames`, in final index order (phase 2 order).
    pub order: Vec<usize>,
}

impl RenamePlan {
    pub fn len(&self) -> usize {
        self.renames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.renames.is_empty()
    }

    /// Renames in the order their final names are assigned.
    pub fn in_final_order(&self) -> impl Iterator<Item = &PlannedRename> {
        self.order.iter().map(move |&i| &self.renames[i])
    }
}

/// Build a plan for the entries of `listing` using a fresh random ordering.
pub fn plan_renames(listing: &DirectoryListing, prefix: &str, naming: &NamingOptions) -> RenamePlan {
    plan_renames_with_rng(listing, prefix, naming, &mut rand::rng())
}

/// Same as [`plan_renames`] with a caller-supplied random source.
pub fn plan_renames_with_rng<R: Rng + ?Sized>(
    listing: &DirectoryListing,
    prefix: &str,
    naming: &NamingOptions,
    rng: &mut R,
) -> RenamePlan {
    let directory = listing.directory.clone();
    let mut allocated = HashSet::new();

    let mut renames: Vec<PlannedRename> = listing
        .entries
        .iter()
        .map(|entry| {
            let temp_name = allocate_temp_name(&entry.extension, listing, &mut allocated);
            PlannedRename {
                original: entry.path.clone(),
                original_name: entry.file_name.clone(),
                temp: directory.join(&temp_name),
                temp_name,
                target: PathBuf::new(),
                final_name: String::new(),
                index: 0,
            }
        })
        .collect();

    let mut order: Vec<usize> = (0..renames.len()).collect();
    order.shuffle(rng);

    for (position, &i) in order.iter().enumerate() {
        let index = naming.start_index + position;
        let extension = &listing.entries[i].extension;
        let rename = &mut renames[i];
        rename.index = index;
        rename.final_name = naming.final_name(prefix, index, extension);
        rename.target = directory.join(&rename.final_name);
    }

    RenamePlan {
        directory,
        prefix: prefix.to_string(),
        renames,
        order,
    }
}

/// Scan `dir` and plan its renames in one step.
pub fn plan_directory(dir: &Path, prefix: &str, naming: &NamingOptions) -> Result<RenamePlan> {
    let listing = scan_directory(dir)?;
    Ok(plan_renames(&listing, prefix, naming))
}

/// Pick a temp name that matches nothing on disk and nothing handed out yet.
fn allocate_temp_name(
    extension: &str,
    listing: &DirectoryListing,
    allocated: &mut HashSet<String>,
) -> String {
    loop {
        let candidate = format!("{TEMP_PREFIX}{}{extension}", Uuid::new_v4().simple());
        let key = candidate.to_lowercase();
        if !listing.existing_names.contains(&key) && allocated.insert(key) {
            return candidate;
        }
    }
}
