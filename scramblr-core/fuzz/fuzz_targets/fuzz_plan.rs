#![no_main]

use libfuzzer_sys::fuzz_target;
use rand::rngs::StdRng;
use rand::SeedableRng;
use scramblr_core::plan::plan_renames_with_rng;
use scramblr_core::{image_extension, DirectoryListing, FileEntry, NamingOptions};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

fuzz_target!(|data: &[u8]| {
    if data.len() < 8 {
        return;
    }

    let (seed, rest) = data.split_at(8);
    let mut seed_bytes = [0u8; 8];
    seed_bytes.copy_from_slice(seed);

    let input = String::from_utf8_lossy(rest);
    let mut lines = input.lines();
    let prefix: String = lines.next().unwrap_or_default().chars().take(20).collect();

    let directory = PathBuf::from("/fuzz");
    let mut seen = HashSet::new();
    let mut entries = Vec::new();
    for line in lines.take(50) {
        let name: String = line.chars().take(60).collect();
        if name.contains('/') || !seen.insert(name.to_lowercase()) {
            continue;
        }
        let Some(extension) = image_extension(Path::new(&name)) else {
            continue;
        };
        entries.push(FileEntry {
            path: directory.join(&name),
            file_name: name,
            extension,
        });
    }

    let listing = DirectoryListing {
        directory,
        entries,
        existing_names: seen,
    };
    let naming = NamingOptions {
        start_index: usize::from(seed_bytes[0] % 2),
        pad_width: usize::from(seed_bytes[1] % 5),
    };
    let mut rng = StdRng::seed_from_u64(u64::from_le_bytes(seed_bytes));
    let plan = plan_renames_with_rng(&listing, &prefix, &naming, &mut rng);

    let mut temps = HashSet::new();
    let mut finals = HashSet::new();
    for rename in &plan.renames {
        assert!(!listing.contains_name(&rename.temp_name));
        assert!(temps.insert(rename.temp_name.to_lowercase()));
        assert!(finals.insert(rename.final_name.clone()));
    }
    assert_eq!(plan.order.len(), plan.renames.len());
});
