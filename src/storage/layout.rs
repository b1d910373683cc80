//! On-disk naming of the category files for one run

use chrono::{DateTime, TimeZone};
use std::path::{Path, PathBuf};

use crate::models::Category;

/// Run stamp format: year, day, unpadded month, time
const STAMP_FORMAT: &str = "%Y-%d-%-m--%H-%M-%S";

/// Where each category file lives for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunLayout {
    root: PathBuf,
    stamp: String,
}

impl RunLayout {
    /// Layout under `root` with an explicit run stamp
    pub fn new(root: impl Into<PathBuf>, stamp: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            stamp: stamp.into(),
        }
    }

    /// Layout stamped with the current local time
    pub fn timestamped(root: impl Into<PathBuf>) -> Self {
        Self::stamped_at(root, &chrono::Local::now())
    }

    /// Layout stamped with `at`
    pub fn stamped_at<Tz: TimeZone>(root: impl Into<PathBuf>, at: &DateTime<Tz>) -> Self
    where
        Tz::Offset: std::fmt::Display,
    {
        Self::new(root, at.format(STAMP_FORMAT).to_string())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn stamp(&self) -> &str {
        &self.stamp
    }

    /// Subdirectory holding a friend-level category, if any
    fn subdirectory(category: Category) -> Option<&'static str> {
        match category {
            Category::FriendChinese => Some("Friends_Chinese"),
            Category::FriendRu => Some("Friends_Ru"),
            Category::FriendBurjui => Some("Friends_Burjui"),
            Category::FriendNoFriends => Some("Friends_No_Friends"),
            _ => None,
        }
    }

    fn file_prefix(category: Category) -> &'static str {
        match category {
            Category::SelfChinese => "Self_Chinese",
            Category::SelfRu => "Self_Ru",
            Category::SelfBurjui => "Self_Burjui",
            Category::SelfNoData => "Self_No_Data",
            Category::FriendChinese => "Chinese",
            Category::FriendRu => "Ru",
            Category::FriendBurjui => "Burjui",
            Category::FriendNoFriends => "No_Friends",
        }
    }

    /// Full path of the file for `category`
    pub fn path(&self, category: Category) -> PathBuf {
        let file = format!("{}_{}.txt", Self::file_prefix(category), self.stamp);
        match Self::subdirectory(category) {
            Some(dir) => self.root.join(dir).join(file),
            None => self.root.join(file),
        }
    }

    /// Directories that must exist before files are opened
    pub fn directories(&self) -> Vec<PathBuf> {
        let mut dirs = vec![self.root.clone()];
        dirs.extend(
            Category::ALL
                .iter()
                .filter_map(|c| Self::subdirectory(*c))
                .map(|dir| self.root.join(dir)),
        );
        dirs
    }
}
