//! Centralized icon definitions.
//!
//! Icon theme is configured in `config.rs` via `ICON_THEME`.
//! This module maps semantic icon names to the selected theme's icons.

use icondata::Icon;

use crate::config::IconTheme;
use crate::models::{Entry, FileType};

// =============================================================================
// Theme Imports
// =============================================================================

mod lucide {
    pub use icondata::{
        LuChevronLeft as ChevronLeft, LuChevronRight as ChevronRight, LuClock as Clock,
        LuCloud as Cloud, LuDownload as Download, LuExternalLink as ExternalLink,
        LuFile as File, LuFileText as FileText, LuFolder as Folder, LuFolderPlus as FolderPlus,
        LuHardDrive as Drive, LuImage as FileImage, LuLoader as Spinner, LuLogOut as Logout,
        LuMusic as FileAudio, LuPencil as Edit, LuRotateCcw as Restore, LuSearch as Search,
        LuStar as Star, LuStar as StarFill, LuTrash2 as Trash, LuUpload as Upload,
        LuVideo as FileVideo, LuX as Close,
    };
}

mod bootstrap {
    pub use icondata::{
        BsArrowCounterclockwise as Restore, BsBoxArrowRight as Logout,
        BsBoxArrowUpRight as ExternalLink, BsChevronLeft as ChevronLeft,
        BsChevronRight as ChevronRight, BsClock as Clock, BsCloudFill as Cloud,
        BsDownload as Download, BsFileEarmark as File, BsFileEarmarkImage as FileImage,
        BsFileEarmarkMusic as FileAudio, BsFileEarmarkPlay as FileVideo,
        BsFileEarmarkText as FileText, BsFolderFill as Folder, BsFolderPlus as FolderPlus,
        BsHdd as Drive, BsHourglassSplit as Spinner, BsPencil as Edit, BsSearch as Search,
        BsStar as Star, BsStarFill as StarFill, BsTrash as Trash, BsUpload as Upload,
        BsXLg as Close,
    };
}

// =============================================================================
// Icon Constants (selected based on theme)
// =============================================================================

macro_rules! themed_icon {
    ($name:ident, $theme_name:ident) => {
        pub const $name: Icon = match crate::config::ICON_THEME {
            IconTheme::Lucide => lucide::$theme_name,
            IconTheme::Bootstrap => bootstrap::$theme_name,
        };
    };
}

themed_icon!(CHEVRON_LEFT, ChevronLeft);
themed_icon!(CHEVRON_RIGHT, ChevronRight);
themed_icon!(CLOUD, Cloud);
themed_icon!(DRIVE, Drive);
themed_icon!(CLOCK, Clock);
themed_icon!(STAR, Star);
themed_icon!(STAR_FILL, StarFill);
themed_icon!(TRASH, Trash);
themed_icon!(RESTORE, Restore);
themed_icon!(FOLDER, Folder);
themed_icon!(FOLDER_PLUS, FolderPlus);
themed_icon!(FILE, File);
themed_icon!(FILE_TEXT, FileText);
themed_icon!(FILE_IMAGE, FileImage);
themed_icon!(FILE_AUDIO, FileAudio);
themed_icon!(FILE_VIDEO, FileVideo);
themed_icon!(UPLOAD, Upload);
themed_icon!(DOWNLOAD, Download);
themed_icon!(EDIT, Edit);
themed_icon!(EXTERNAL_LINK, ExternalLink);
themed_icon!(SEARCH, Search);
themed_icon!(SPINNER, Spinner);
themed_icon!(LOGOUT, Logout);
themed_icon!(CLOSE, Close);

/// Icon for an entry, by kind and inferred file type.
pub fn entry_icon(entry: &Entry) -> Icon {
    match entry {
        Entry::Folder(_) => FOLDER,
        Entry::File(file) => match file.file_type() {
            FileType::Image => FILE_IMAGE,
            FileType::Document => FILE_TEXT,
            FileType::Audio => FILE_AUDIO,
            FileType::Video => FILE_VIDEO,
            FileType::Other => FILE,
        },
    }
}
