// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end properties of the metadata tree and the directory scanner.

use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use marquee_library::sort::{compare_file_name, compare_rating};
use marquee_library::{
    FileId, FileTree, FileType, FileTypeMask, PlatformId, SORT_TYPES, SystemData, SystemInfo,
    TreeError,
};

fn system() -> Rc<SystemInfo> {
    Rc::new(SystemInfo::new("test", "Test", "/roms/test"))
}

fn game(tree: &mut FileTree, sys: &Rc<SystemInfo>, folder: FileId, file: &str) -> FileId {
    let id = tree.create(FileType::Game, format!("/roms/test/{file}"), sys);
    assert_eq!(tree.add_child(folder, id), Ok(true), "attach {file}");
    id
}

/// Children names at every level, pre-order.
fn shape(tree: &FileTree, id: FileId) -> Vec<String> {
    tree.descendants_matching(id, FileTypeMask::ALL)
        .into_iter()
        .map(|c| tree.get(c).name().to_owned())
        .collect()
}

#[test]
fn equal_keys_keep_insertion_order() {
    let sys = system();
    let mut tree = FileTree::new();
    let root = tree.create(FileType::Folder, "/roms/test", &sys);
    let c = game(&mut tree, &sys, root, "C.zip");
    let a = game(&mut tree, &sys, root, "A.zip");
    let b = game(&mut tree, &sys, root, "B.zip");
    for id in [c, a, b] {
        tree.get_mut(id).metadata.set("rating", "3");
    }

    tree.sort(root, compare_rating, true);
    assert_eq!(tree.children(root), &[c, a, b], "stable on ties");
}

#[test]
fn sorting_twice_changes_nothing() {
    let sys = system();
    let mut tree = FileTree::new();
    let root = tree.create(FileType::Folder, "/roms/test", &sys);
    for file in ["d.zip", "b.zip", "c.zip", "a.zip"] {
        game(&mut tree, &sys, root, file);
    }
    let sub = tree.create(FileType::Folder, "/roms/test/sub", &sys);
    tree.add_child(root, sub).unwrap();
    game(&mut tree, &sys, sub, "z.zip");
    game(&mut tree, &sys, sub, "y.zip");

    tree.sort(root, compare_file_name, true);
    let once = shape(&tree, root);
    tree.sort(root, compare_file_name, true);
    assert_eq!(shape(&tree, root), once, "idempotent");
}

#[test]
fn descending_is_reversed_ascending_at_every_level() {
    let sys = system();
    let mut tree = FileTree::new();
    let root = tree.create(FileType::Folder, "/roms/test", &sys);
    game(&mut tree, &sys, root, "b.zip");
    let sub = tree.create(FileType::Folder, "/roms/test/m", &sys);
    tree.add_child(root, sub).unwrap();
    game(&mut tree, &sys, sub, "y.zip");
    game(&mut tree, &sys, sub, "x.zip");
    game(&mut tree, &sys, root, "a.zip");

    tree.sort_by_type(root, &SORT_TYPES[0]);
    let mut root_asc = tree.children(root).to_vec();
    let mut sub_asc = tree.children(sub).to_vec();
    root_asc.reverse();
    sub_asc.reverse();

    tree.sort_by_type(root, &SORT_TYPES[1]);
    assert_eq!(tree.children(root), root_asc.as_slice(), "top level reversed");
    assert_eq!(tree.children(sub), sub_asc.as_slice(), "nested level reversed");
}

#[test]
fn structural_mistakes_are_errors() {
    let sys = system();
    let mut tree = FileTree::new();
    let root = tree.create(FileType::Folder, "/roms/test", &sys);
    let a = game(&mut tree, &sys, root, "a.zip");
    let b = tree.create(FileType::Game, "/roms/test/b.zip", &sys);

    assert_eq!(tree.add_child(a, b), Err(TreeError::NotAGroup));
    assert_eq!(tree.add_child(root, a), Err(TreeError::AlreadyParented));
    assert_eq!(tree.children(root), &[a], "failed calls leave the tree as it was");
}

#[test]
fn duplicate_file_names_are_dropped() {
    let sys = system();
    let mut tree = FileTree::new();
    let root = tree.create(FileType::Folder, "/roms/test", &sys);
    let first = game(&mut tree, &sys, root, "mario.zip");
    let second = tree.create(FileType::Game, "/other/mario.zip", &sys);

    assert_eq!(tree.add_child(root, second), Ok(false));
    assert_eq!(tree.children(root).len(), 1);
    assert_eq!(tree.find_by_basename(root, "mario.zip"), Some(first));
    assert_eq!(tree.parent(second), None, "rejected entry stays detached");
}

#[test]
fn moving_an_entry_moves_its_index_key() {
    let sys = system();
    let mut tree = FileTree::new();
    let root = tree.create(FileType::Folder, "/roms/test", &sys);
    let left = tree.create(FileType::Folder, "/roms/test/left", &sys);
    let right = tree.create(FileType::Folder, "/roms/test/right", &sys);
    tree.add_child(root, left).unwrap();
    tree.add_child(root, right).unwrap();
    let g = game(&mut tree, &sys, left, "g.zip");

    tree.remove_child(left, g).unwrap();
    tree.add_child(right, g).unwrap();

    assert!(tree.find_by_basename(left, "g.zip").is_none());
    assert_eq!(tree.find_by_basename(right, "g.zip"), Some(g));
    assert_eq!(tree.parent(g), Some(right));
    assert!(tree.children(left).is_empty());
}

#[test]
fn descendants_are_pre_order_and_filtered() {
    let sys = system();
    let mut tree = FileTree::new();
    let root = tree.create(FileType::Folder, "/roms/test", &sys);
    let a = game(&mut tree, &sys, root, "A.zip");
    let b = tree.create(FileType::Folder, "/roms/test/B", &sys);
    tree.add_child(root, b).unwrap();
    let c = game(&mut tree, &sys, b, "C.zip");
    let d = game(&mut tree, &sys, root, "D.zip");

    assert_eq!(tree.descendants_matching(root, FileTypeMask::GAME), vec![a, c, d]);
    assert_eq!(tree.descendants_matching(root, FileTypeMask::ALL), vec![a, b, c, d]);
    assert_eq!(tree.descendants_matching(root, FileTypeMask::FOLDER), vec![b]);
    assert!(tree.descendants_matching(a, FileTypeMask::ALL).is_empty(), "games have none");
}

#[test]
fn clean_name_drops_tags() {
    let sys = system();
    let mut tree = FileTree::new();
    let id = tree.create(FileType::Game, "/roms/test/Super Game (USA) [!].zip", &sys);
    assert_eq!(tree.display_name(id), "Super Game (USA) [!]");
    assert_eq!(tree.clean_name(id), "Super Game");
}

#[test]
fn arcade_clean_name_uses_the_title() {
    let mut info = SystemInfo::new("mame", "MAME", "/roms/mame");
    info.platform_ids.push(PlatformId::Arcade);
    let sys = Rc::new(info);
    let mut tree = FileTree::new();
    let id = tree.create(FileType::Game, "/roms/mame/mslug.zip", &sys);
    assert_eq!(tree.clean_name(id), "Metal Slug - Super Vehicle-001");
    let unknown = tree.create(FileType::Game, "/roms/mame/zzznotagame.zip", &sys);
    assert_eq!(tree.clean_name(unknown), "zzznotagame", "unknown short names pass through");
}

#[test]
fn name_is_not_rederived_after_a_move() {
    let sys = system();
    let mut tree = FileTree::new();
    let id = tree.create(FileType::Game, "/roms/test/old.zip", &sys);
    tree.set_path(id, "/roms/test/new.zip").unwrap();
    assert_eq!(tree.get(id).name(), "old");
    assert_eq!(tree.display_name(id), "new");
}

// ---------------------------------------------------------------------------
// Scanning
// ---------------------------------------------------------------------------

/// A scratch directory removed on drop.
struct ScratchDir(PathBuf);

impl ScratchDir {
    fn new(tag: &str) -> Self {
        let dir = std::env::temp_dir().join(format!(
            "marquee_library_{tag}_{}",
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        Self(dir)
    }

    fn touch(&self, rel: &str) {
        let path = self.0.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"").unwrap();
    }

    fn path(&self) -> &Path {
        &self.0
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.0);
    }
}

#[test]
fn populate_builds_the_tree_from_disk() {
    let dir = ScratchDir::new("populate");
    dir.touch("b.sfc");
    dir.touch("A.SFC");
    dir.touch("readme.txt");
    dir.touch("rpg/c.sfc");
    dir.touch("empty/notes.txt");
    dir.touch(".hidden/d.sfc");

    let mut info = SystemInfo::new("snes", "Super Nintendo", dir.path());
    info.extensions = vec![".sfc".into()];
    let mut system = SystemData::new(info);

    assert_eq!(system.populate(), 3);
    assert_eq!(system.game_count(), 3);

    let tree = system.tree();
    let root = system.root();
    let names: Vec<_> = tree
        .children(root)
        .iter()
        .map(|&c| tree.get(c).basename())
        .collect();
    assert_eq!(names, ["A.SFC", "b.sfc", "rpg"], "file-name order, empty folders pruned");

    let rpg = tree.find_by_basename(root, "rpg").unwrap();
    assert_eq!(tree.get(rpg).file_type(), FileType::Folder);
    assert!(tree.find_by_basename(rpg, "c.sfc").is_some());
    assert!(tree.find_by_basename(root, ".hidden").is_none(), "hidden entries skipped");
}

#[test]
fn populate_then_sort_by_name() {
    let dir = ScratchDir::new("sort");
    for file in ["zelda.nes", "metroid.nes", "kirby.nes"] {
        dir.touch(file);
    }
    let mut info = SystemInfo::new("nes", "NES", dir.path());
    info.extensions = vec![".nes".into()];
    let mut system = SystemData::new(info);
    system.populate();

    system.sort(&SORT_TYPES[1]);
    let tree = system.tree();
    let names: Vec<_> = tree
        .children(system.root())
        .iter()
        .map(|&c| tree.get(c).name().to_owned())
        .collect();
    assert_eq!(names, ["zelda", "metroid", "kirby"]);
}

#[test]
fn populating_a_missing_directory_finds_nothing() {
    let mut info = SystemInfo::new("gone", "Gone", "/nonexistent/marquee/roms");
    info.extensions = vec![".zip".into()];
    let mut system = SystemData::new(info);
    assert_eq!(system.populate(), 0);
    assert!(system.tree().children(system.root()).is_empty());
}
