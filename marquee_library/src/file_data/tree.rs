// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Entry storage, topology, sorting and name derivation.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use super::{FileChangeType, FileId, FileType, FileTypeMask};
use crate::error::TreeError;
use crate::mame_names;
use crate::metadata::MetaDataList;
use crate::names::remove_parenthesis;
use crate::sort::{Comparator, SortType};
use crate::system::SystemInfo;

/// Extensions tried, in order, for images stored next to an entry.
const LOCAL_IMAGE_EXTENSIONS: [&str; 2] = ["png", "jpg"];

/// One entry of a [`FileTree`].
#[derive(Debug)]
pub struct FileData {
    file_type: FileType,
    path: PathBuf,
    system: Rc<SystemInfo>,
    parent: Option<FileId>,
    children: Vec<FileId>,
    children_by_filename: HashMap<String, FileId>,
    /// Metadata dictionary. Edits made here are not reported by
    /// [`FileTree::drain_changes`]; use [`FileTree::set_metadata`] for that.
    pub metadata: MetaDataList,
}

impl FileData {
    /// Game or folder.
    #[must_use]
    pub fn file_type(&self) -> FileType {
        self.file_type
    }

    /// Filesystem path of the entry.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// System the entry belongs to.
    #[must_use]
    pub fn system(&self) -> &Rc<SystemInfo> {
        &self.system
    }

    /// Containing folder, if attached.
    #[must_use]
    pub fn parent(&self) -> Option<FileId> {
        self.parent
    }

    /// Children in display order.
    #[must_use]
    pub fn children(&self) -> &[FileId] {
        &self.children
    }

    /// Children keyed by file name.
    #[must_use]
    pub fn children_by_filename(&self) -> &HashMap<String, FileId> {
        &self.children_by_filename
    }

    /// The `name` metadata value.
    #[must_use]
    pub fn name(&self) -> &str {
        self.metadata.get("name")
    }

    /// File name including the extension: the key in the parent's index.
    #[must_use]
    pub fn basename(&self) -> String {
        basename(&self.path)
    }

    /// Best guess at the real title: the file stem, translated from a MAME
    /// short name when the system is an arcade system.
    ///
    /// Computed from the current path on every call.
    #[must_use]
    pub fn display_name(&self) -> String {
        let stem = self
            .path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        if self.system.is_arcade() {
            mame_names::real_name(&stem).to_owned()
        } else {
            stem
        }
    }

    /// [`display_name`](Self::display_name) without `(...)` and `[...]`
    /// tags.
    #[must_use]
    pub fn clean_name(&self) -> String {
        remove_parenthesis(&self.display_name())
    }

    /// Thumbnail to show: `thumbnail` metadata, else `image`, else a local
    /// `images/<name>-image.{png,jpg}`.
    #[must_use]
    pub fn thumbnail_path(&self) -> Option<PathBuf> {
        self.metadata_path("thumbnail")
            .or_else(|| self.metadata_path("image"))
            .or_else(|| self.local_image("image"))
    }

    /// Image to show: `image` metadata, else a local
    /// `images/<name>-image.{png,jpg}`.
    #[must_use]
    pub fn image_path(&self) -> Option<PathBuf> {
        self.metadata_path("image").or_else(|| self.local_image("image"))
    }

    /// Marquee to show: `marquee` metadata, else a local
    /// `images/<name>-marquee.{png,jpg}`.
    #[must_use]
    pub fn marquee_path(&self) -> Option<PathBuf> {
        self.metadata_path("marquee").or_else(|| self.local_image("marquee"))
    }

    fn metadata_path(&self, key: &str) -> Option<PathBuf> {
        let value = self.metadata.get(key);
        (!value.is_empty()).then(|| PathBuf::from(value))
    }

    /// Looks for `images/<display name>-<kind>.<ext>` beside the entry.
    fn local_image(&self, kind: &str) -> Option<PathBuf> {
        let dir = self.path.parent()?.join("images");
        let name = self.display_name();
        LOCAL_IMAGE_EXTENSIONS
            .iter()
            .map(|ext| dir.join(format!("{name}-{kind}.{ext}")))
            .find(|candidate| candidate.is_file())
    }
}

fn basename(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Arena of metadata entries.
///
/// Entries are addressed by [`FileId`] handles. Destroyed entries free their
/// slot for reuse; generation counters make old handles fail fast.
///
/// Topology mutations return [`TreeError`] for caller mistakes. Internal
/// inconsistencies (a child missing from its parent's list) panic.
#[derive(Debug, Default)]
pub struct FileTree {
    nodes: Vec<Option<FileData>>,
    generation: Vec<u32>,
    free_list: Vec<u32>,
    live: usize,
    changes: Vec<(FileId, FileChangeType)>,
}

impl FileTree {
    /// Creates an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // -- Lifecycle --

    /// Creates a detached entry.
    ///
    /// The metadata starts from `file_type`'s schema, with `name` set to the
    /// [`display_name`](FileData::display_name). `name` is not updated if the
    /// path changes later.
    pub fn create(
        &mut self,
        file_type: FileType,
        path: impl Into<PathBuf>,
        system: &Rc<SystemInfo>,
    ) -> FileId {
        let mut data = FileData {
            file_type,
            path: path.into(),
            system: Rc::clone(system),
            parent: None,
            children: Vec::new(),
            children_by_filename: HashMap::new(),
            metadata: MetaDataList::new(file_type),
        };
        if data.metadata.get("name").is_empty() {
            let name = data.display_name();
            data.metadata.set("name", name);
        }

        self.live += 1;
        if let Some(idx) = self.free_list.pop() {
            self.nodes[idx as usize] = Some(data);
            FileId {
                idx,
                generation: self.generation[idx as usize],
            }
        } else {
            let idx = u32::try_from(self.nodes.len()).unwrap_or(u32::MAX);
            self.nodes.push(Some(data));
            self.generation.push(0);
            FileId { idx, generation: 0 }
        }
    }

    /// Destroys an entry and, recursively, all of its children. The entry is
    /// detached from its folder first.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn destroy(&mut self, id: FileId) {
        if let Some(parent) = self.get(id).parent {
            self.unlink(parent, id);
        }
        let children = self.get(id).children.clone();
        for child in children {
            self.destroy(child);
        }

        let i = id.idx as usize;
        self.nodes[i] = None;
        self.generation[i] += 1;
        self.free_list.push(id.idx);
        self.live -= 1;
    }

    /// Returns whether `id` refers to a live entry.
    #[must_use]
    pub fn is_alive(&self, id: FileId) -> bool {
        self.generation
            .get(id.idx as usize)
            .is_some_and(|&g| g == id.generation)
            && self.nodes[id.idx as usize].is_some()
    }

    /// Number of live entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.live
    }

    /// Returns whether the tree has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    // -- Access --

    /// Returns the entry.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    #[must_use]
    pub fn get(&self, id: FileId) -> &FileData {
        match self.nodes.get(id.idx as usize) {
            Some(Some(data)) if self.generation[id.idx as usize] == id.generation => data,
            _ => panic!("stale FileId: {id:?}"),
        }
    }

    /// Returns the entry mutably.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn get_mut(&mut self, id: FileId) -> &mut FileData {
        match self.nodes.get_mut(id.idx as usize) {
            Some(Some(data)) if self.generation[id.idx as usize] == id.generation => data,
            _ => panic!("stale FileId: {id:?}"),
        }
    }

    /// Sets a metadata value and reports [`FileChangeType::MetadataChanged`].
    pub fn set_metadata(&mut self, id: FileId, key: &str, value: impl Into<String>) {
        self.get_mut(id).metadata.set(key, value);
        self.changes.push((id, FileChangeType::MetadataChanged));
    }

    /// Moves the entry to `path`, re-keying it in its folder's index.
    ///
    /// The `name` metadata keeps the value derived at creation.
    pub fn set_path(&mut self, id: FileId, path: impl Into<PathBuf>) -> Result<(), TreeError> {
        let path = path.into();
        if let Some(parent) = self.get(id).parent {
            let old_key = self.get(id).basename();
            let new_key = basename(&path);
            let index = &mut self.get_mut(parent).children_by_filename;
            if new_key != old_key {
                if index.contains_key(&new_key) {
                    return Err(TreeError::NameTaken);
                }
                index.remove(&old_key);
                index.insert(new_key, id);
            }
        }
        self.get_mut(id).path = path;
        Ok(())
    }

    /// Containing folder, if attached.
    #[must_use]
    pub fn parent(&self, id: FileId) -> Option<FileId> {
        self.get(id).parent
    }

    /// Children of `id` in display order.
    #[must_use]
    pub fn children(&self, id: FileId) -> &[FileId] {
        &self.get(id).children
    }

    /// Top-most ancestor of `id`, or `id` itself.
    #[must_use]
    pub fn root(&self, mut id: FileId) -> FileId {
        while let Some(parent) = self.get(id).parent {
            id = parent;
        }
        id
    }

    /// Child of `folder` with file name `basename`.
    #[must_use]
    pub fn find_by_basename(&self, folder: FileId, basename: &str) -> Option<FileId> {
        self.get(folder).children_by_filename.get(basename).copied()
    }

    /// See [`FileData::display_name`].
    #[must_use]
    pub fn display_name(&self, id: FileId) -> String {
        self.get(id).display_name()
    }

    /// See [`FileData::clean_name`].
    #[must_use]
    pub fn clean_name(&self, id: FileId) -> String {
        self.get(id).clean_name()
    }

    // -- Topology --

    /// Appends `child` to `folder`.
    ///
    /// Returns `Ok(false)` and leaves both entries untouched when `folder`
    /// already has a child with the same file name.
    ///
    /// # Errors
    ///
    /// - [`TreeError::NotAGroup`] if `folder` is a game.
    /// - [`TreeError::AlreadyParented`] if `child` is attached elsewhere.
    /// - [`TreeError::Cycle`] if `child` is `folder` or one of its ancestors.
    pub fn add_child(&mut self, folder: FileId, child: FileId) -> Result<bool, TreeError> {
        if self.get(folder).file_type != FileType::Folder {
            return Err(TreeError::NotAGroup);
        }
        if self.get(child).parent.is_some() {
            return Err(TreeError::AlreadyParented);
        }
        if self.root(folder) == child {
            return Err(TreeError::Cycle);
        }

        let key = self.get(child).basename();
        let data = self.get_mut(folder);
        if data.children_by_filename.contains_key(&key) {
            log::debug!("dropping duplicate entry {key:?}");
            return Ok(false);
        }
        data.children_by_filename.insert(key, child);
        data.children.push(child);
        self.get_mut(child).parent = Some(folder);
        self.changes.push((child, FileChangeType::Added));
        Ok(true)
    }

    /// Detaches `child` from `folder`. The child stays alive.
    ///
    /// # Errors
    ///
    /// - [`TreeError::NotAGroup`] if `folder` is a game.
    /// - [`TreeError::NotAChild`] if `child`'s parent is not `folder`.
    ///
    /// # Panics
    ///
    /// Panics if `child` names `folder` as its parent but is missing from
    /// `folder`'s children.
    pub fn remove_child(&mut self, folder: FileId, child: FileId) -> Result<(), TreeError> {
        if self.get(folder).file_type != FileType::Folder {
            return Err(TreeError::NotAGroup);
        }
        if self.get(child).parent != Some(folder) {
            return Err(TreeError::NotAChild);
        }
        self.unlink(folder, child);
        Ok(())
    }

    /// Collects every descendant of `id` whose type is in `mask`, in
    /// pre-order: each child before its own subtree, children in order.
    #[must_use]
    pub fn descendants_matching(&self, id: FileId, mask: FileTypeMask) -> Vec<FileId> {
        let mut out = Vec::new();
        self.collect_matching(id, mask, &mut out);
        out
    }

    /// Stable-sorts every folder in the subtree of `id` by `comparator`.
    ///
    /// Subtrees are sorted before their parent level. With `ascending` false
    /// each level is reversed after sorting.
    pub fn sort(&mut self, id: FileId, comparator: Comparator, ascending: bool) {
        self.sort_level(id, comparator, ascending);
        self.changes.push((id, FileChangeType::Sorted));
    }

    /// Sorts by a registry entry. See [`sort`](Self::sort).
    pub fn sort_by_type(&mut self, id: FileId, sort_type: &SortType) {
        self.sort(id, sort_type.comparator, sort_type.ascending);
    }

    /// Moves the changes recorded since the last call into `out`.
    pub fn drain_changes(&mut self, out: &mut Vec<(FileId, FileChangeType)>) {
        out.append(&mut self.changes);
    }

    // -- Internal helpers --

    fn unlink(&mut self, folder: FileId, child: FileId) {
        let key = self.get(child).basename();
        let data = self.get_mut(folder);
        let indexed = data.children_by_filename.remove(&key);
        let Some(pos) = data.children.iter().position(|&c| c == child) else {
            panic!("file tree corruption: {child:?} missing from the children of {folder:?}");
        };
        assert_eq!(
            indexed,
            Some(child),
            "file tree corruption: basename index out of sync for {key:?}"
        );
        data.children.remove(pos);
        self.get_mut(child).parent = None;
        self.changes.push((child, FileChangeType::Removed));
    }

    fn collect_matching(&self, id: FileId, mask: FileTypeMask, out: &mut Vec<FileId>) {
        for &child in &self.get(id).children {
            if mask.contains(self.get(child).file_type) {
                out.push(child);
            }
            self.collect_matching(child, mask, out);
        }
    }

    fn sort_level(&mut self, id: FileId, comparator: Comparator, ascending: bool) {
        let mut children = core::mem::take(&mut self.get_mut(id).children);
        for &child in &children {
            if !self.get(child).children.is_empty() {
                self.sort_level(child, comparator, ascending);
            }
        }
        children.sort_by(|&a, &b| comparator(self.get(a), self.get(b)));
        if !ascending {
            children.reverse();
        }
        self.get_mut(id).children = children;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::PlatformId;
    use crate::sort::{compare_file_name, compare_rating};

    fn system(platforms: Vec<PlatformId>) -> Rc<SystemInfo> {
        Rc::new(SystemInfo {
            name: "test".into(),
            full_name: "Test".into(),
            start_path: PathBuf::from("/roms/test"),
            extensions: vec![".zip".into()],
            platform_ids: platforms,
        })
    }

    fn rated(
        tree: &mut FileTree,
        sys: &Rc<SystemInfo>,
        folder: FileId,
        file: &str,
        rating: &str,
    ) -> FileId {
        let id = tree.create(FileType::Game, format!("/roms/test/{file}"), sys);
        tree.get_mut(id).metadata.set("rating", rating);
        assert_eq!(tree.add_child(folder, id), Ok(true));
        id
    }

    #[test]
    fn create_seeds_name_from_stem() {
        let sys = system(vec![]);
        let mut tree = FileTree::new();
        let id = tree.create(FileType::Game, "/roms/test/Super Game (USA).zip", &sys);
        assert_eq!(tree.get(id).name(), "Super Game (USA)");
        assert_eq!(tree.get(id).metadata.get("developer"), "unknown");
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn arcade_systems_translate_mame_names() {
        let mut tree = FileTree::new();
        for platform in [PlatformId::Arcade, PlatformId::NeoGeo] {
            let id = tree.create(FileType::Game, "/roms/mslug.zip", &system(vec![platform]));
            assert_eq!(tree.display_name(id), "Metal Slug - Super Vehicle-001");
            assert_eq!(tree.get(id).name(), "Metal Slug - Super Vehicle-001");
        }
        let id = tree.create(FileType::Game, "/roms/mslug.zip", &system(vec![PlatformId::Snes]));
        assert_eq!(tree.display_name(id), "mslug");
    }

    #[test]
    fn add_child_preconditions() {
        let sys = system(vec![]);
        let mut tree = FileTree::new();
        let root = tree.create(FileType::Folder, "/roms/test", &sys);
        let game = tree.create(FileType::Game, "/roms/test/a.zip", &sys);
        let other = tree.create(FileType::Game, "/roms/test/b.zip", &sys);

        assert_eq!(tree.add_child(game, other), Err(TreeError::NotAGroup));
        assert_eq!(tree.add_child(root, game), Ok(true));
        assert_eq!(tree.add_child(root, game), Err(TreeError::AlreadyParented));
        assert_eq!(tree.add_child(root, root), Err(TreeError::Cycle));

        let sub = tree.create(FileType::Folder, "/roms/test/sub", &sys);
        assert_eq!(tree.add_child(root, sub), Ok(true));
        let top = tree.create(FileType::Folder, "/roms", &sys);
        assert_eq!(tree.add_child(top, root), Ok(true));
        let lone = tree.create(FileType::Folder, "/elsewhere", &sys);
        assert_eq!(tree.add_child(sub, lone), Ok(true));
        assert_eq!(tree.root(lone), top);
    }

    #[test]
    fn remove_child_preconditions() {
        let sys = system(vec![]);
        let mut tree = FileTree::new();
        let root = tree.create(FileType::Folder, "/roms/test", &sys);
        let game = tree.create(FileType::Game, "/roms/test/a.zip", &sys);
        assert_eq!(tree.remove_child(root, game), Err(TreeError::NotAChild));
        assert_eq!(tree.remove_child(game, root), Err(TreeError::NotAGroup));
        tree.add_child(root, game).unwrap();
        assert_eq!(tree.remove_child(root, game), Ok(()));
        assert!(tree.children(root).is_empty());
        assert!(tree.find_by_basename(root, "a.zip").is_none());
        assert!(tree.is_alive(game), "removal does not destroy");
    }

    #[test]
    #[should_panic(expected = "file tree corruption")]
    fn corrupted_child_list_is_fatal() {
        let sys = system(vec![]);
        let mut tree = FileTree::new();
        let root = tree.create(FileType::Folder, "/roms/test", &sys);
        let game = tree.create(FileType::Game, "/roms/test/a.zip", &sys);
        tree.add_child(root, game).unwrap();
        tree.get_mut(root).children.clear();
        let _ = tree.remove_child(root, game);
    }

    #[test]
    fn destroy_is_recursive_and_detaches() {
        let sys = system(vec![]);
        let mut tree = FileTree::new();
        let root = tree.create(FileType::Folder, "/roms/test", &sys);
        let sub = tree.create(FileType::Folder, "/roms/test/sub", &sys);
        let game = tree.create(FileType::Game, "/roms/test/sub/a.zip", &sys);
        tree.add_child(root, sub).unwrap();
        tree.add_child(sub, game).unwrap();

        tree.destroy(sub);
        assert!(!tree.is_alive(sub));
        assert!(!tree.is_alive(game));
        assert!(tree.children(root).is_empty());
        assert!(tree.find_by_basename(root, "sub").is_none());
        assert_eq!(tree.len(), 1);

        let reused = tree.create(FileType::Game, "/roms/test/b.zip", &sys);
        assert!(!tree.is_alive(sub) && !tree.is_alive(game), "stale after reuse");
        assert!(tree.is_alive(reused));
    }

    #[test]
    #[should_panic(expected = "stale FileId")]
    fn stale_handle_panics() {
        let sys = system(vec![]);
        let mut tree = FileTree::new();
        let id = tree.create(FileType::Game, "/roms/test/a.zip", &sys);
        tree.destroy(id);
        let _ = tree.get(id);
    }

    #[test]
    fn set_path_rekeys_but_keeps_name() {
        let sys = system(vec![]);
        let mut tree = FileTree::new();
        let root = tree.create(FileType::Folder, "/roms/test", &sys);
        let a = rated(&mut tree, &sys, root, "a.zip", "0");
        let _b = rated(&mut tree, &sys, root, "b.zip", "0");

        assert_eq!(tree.set_path(a, "/roms/test/b.zip"), Err(TreeError::NameTaken));
        tree.set_path(a, "/roms/test/c.zip").unwrap();
        assert_eq!(tree.find_by_basename(root, "c.zip"), Some(a));
        assert!(tree.find_by_basename(root, "a.zip").is_none());
        assert_eq!(tree.display_name(a), "c");
        assert_eq!(tree.get(a).name(), "a", "name is derived once, at creation");
    }

    #[test]
    fn sort_recurses_into_folders() {
        let sys = system(vec![]);
        let mut tree = FileTree::new();
        let root = tree.create(FileType::Folder, "/roms/test", &sys);
        let z = rated(&mut tree, &sys, root, "z.zip", "0.5");
        let sub = tree.create(FileType::Folder, "/roms/test/m", &sys);
        tree.add_child(root, sub).unwrap();
        let y = rated(&mut tree, &sys, sub, "y.zip", "0.1");
        let x = rated(&mut tree, &sys, sub, "x.zip", "0.9");

        tree.sort(root, compare_file_name, true);
        assert_eq!(tree.children(root), &[sub, z]);
        assert_eq!(tree.children(sub), &[x, y]);

        tree.sort(root, compare_rating, false);
        assert_eq!(tree.children(sub), &[x, y], "highest rating first");
    }

    #[test]
    fn changes_are_recorded_in_order() {
        let sys = system(vec![]);
        let mut tree = FileTree::new();
        let root = tree.create(FileType::Folder, "/roms/test", &sys);
        let game = tree.create(FileType::Game, "/roms/test/a.zip", &sys);
        tree.add_child(root, game).unwrap();
        tree.set_metadata(game, "rating", "1.0");
        tree.sort(root, compare_file_name, true);
        tree.remove_child(root, game).unwrap();

        let mut changes = Vec::new();
        tree.drain_changes(&mut changes);
        assert_eq!(
            changes,
            vec![
                (game, FileChangeType::Added),
                (game, FileChangeType::MetadataChanged),
                (root, FileChangeType::Sorted),
                (game, FileChangeType::Removed),
            ]
        );
        changes.clear();
        tree.drain_changes(&mut changes);
        assert!(changes.is_empty());
    }

    #[test]
    fn media_paths_prefer_metadata() {
        let sys = system(vec![]);
        let mut tree = FileTree::new();
        let id = tree.create(FileType::Game, "/nonexistent/roms/a.zip", &sys);
        assert_eq!(tree.get(id).thumbnail_path(), None);
        tree.get_mut(id).metadata.set("image", "/media/a.png");
        assert_eq!(tree.get(id).thumbnail_path(), Some(PathBuf::from("/media/a.png")));
        assert_eq!(tree.get(id).image_path(), Some(PathBuf::from("/media/a.png")));
        tree.get_mut(id).metadata.set("thumbnail", "/media/a-thumb.png");
        assert_eq!(tree.get(id).thumbnail_path(), Some(PathBuf::from("/media/a-thumb.png")));
        assert_eq!(tree.get(id).marquee_path(), None);
    }
}
