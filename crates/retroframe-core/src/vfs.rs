//! libretro VFS (interface version 3) on top of `std::fs`.
//!
//! File and directory handles are boxed Rust values passed to the core as
//! opaque pointers. None of these callbacks need the active bridge.

use std::ffi::{CStr, CString};
use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::os::raw::{c_char, c_int, c_uint, c_void};
use std::path::Path;
use std::ptr;

use log::{debug, warn};
use retroframe_sys as sys;

/// Open file behind a `retro_vfs_file_handle`.
#[derive(Debug)]
pub struct VfsFile {
    path: CString,
    file: File,
}

/// Directory listing behind a `retro_vfs_dir_handle`.
#[derive(Debug)]
pub struct VfsDir {
    entries: Vec<DirEntry>,
    /// `None` until the first `readdir`.
    cursor: Option<usize>,
}

#[derive(Debug)]
struct DirEntry {
    name: CString,
    is_dir: bool,
}

/// Translates libretro access flags into `OpenOptions`. `None` for a mode
/// that asks for neither read nor write.
pub fn open_options(mode: c_uint) -> Option<OpenOptions> {
    let read = mode & sys::RETRO_VFS_FILE_ACCESS_READ != 0;
    let write = mode & sys::RETRO_VFS_FILE_ACCESS_WRITE != 0;
    let update = mode & sys::RETRO_VFS_FILE_ACCESS_UPDATE_EXISTING != 0;

    let mut options = OpenOptions::new();
    match (read, write) {
        (true, false) => {
            options.read(true);
        }
        (_, true) => {
            options.read(read).write(true);
            if !update {
                options.create(true).truncate(true);
            }
        }
        (false, false) => return None,
    }
    Some(options)
}

unsafe fn path_arg<'a>(path: *const c_char) -> Option<&'a Path> {
    if path.is_null() {
        return None;
    }
    let path = unsafe { CStr::from_ptr(path) }.to_str().ok()?;
    Some(Path::new(path))
}

unsafe fn file_arg<'a>(stream: *mut sys::retro_vfs_file_handle) -> Option<&'a mut VfsFile> {
    if stream.is_null() {
        return None;
    }
    Some(unsafe { &mut *stream.cast::<VfsFile>() })
}

unsafe fn dir_arg<'a>(dir: *mut sys::retro_vfs_dir_handle) -> Option<&'a mut VfsDir> {
    if dir.is_null() {
        return None;
    }
    Some(unsafe { &mut *dir.cast::<VfsDir>() })
}

fn io_result(result: io::Result<u64>) -> i64 {
    match result {
        Ok(value) => i64::try_from(value).unwrap_or(i64::MAX),
        Err(err) => {
            debug!("VFS: {err}");
            -1
        }
    }
}

unsafe extern "C" fn cb_get_path(stream: *mut sys::retro_vfs_file_handle) -> *const c_char {
    match unsafe { file_arg(stream) } {
        Some(file) => file.path.as_ptr(),
        None => ptr::null(),
    }
}

unsafe extern "C" fn cb_open(
    path: *const c_char,
    mode: c_uint,
    _hints: c_uint,
) -> *mut sys::retro_vfs_file_handle {
    let Some(path) = (unsafe { path_arg(path) }) else {
        return ptr::null_mut();
    };
    let Some(options) = open_options(mode) else {
        warn!("VFS: unsupported open mode {mode:#x} for {}", path.display());
        return ptr::null_mut();
    };
    let Some(c_path) = to_c_path(path) else {
        return ptr::null_mut();
    };

    match options.open(path) {
        Ok(file) => {
            let handle = Box::new(VfsFile { path: c_path, file });
            Box::into_raw(handle).cast()
        }
        Err(err) => {
            debug!("VFS: open {} failed: {err}", path.display());
            ptr::null_mut()
        }
    }
}

unsafe extern "C" fn cb_close(stream: *mut sys::retro_vfs_file_handle) -> c_int {
    if stream.is_null() {
        return -1;
    }
    drop(unsafe { Box::from_raw(stream.cast::<VfsFile>()) });
    0
}

unsafe extern "C" fn cb_size(stream: *mut sys::retro_vfs_file_handle) -> i64 {
    let Some(file) = (unsafe { file_arg(stream) }) else {
        return -1;
    };
    io_result(file.file.metadata().map(|meta| meta.len()))
}

unsafe extern "C" fn cb_truncate(stream: *mut sys::retro_vfs_file_handle, length: i64) -> i64 {
    let Some(file) = (unsafe { file_arg(stream) }) else {
        return -1;
    };
    let Ok(length) = u64::try_from(length) else {
        return -1;
    };
    io_result(file.file.set_len(length).map(|()| 0))
}

unsafe extern "C" fn cb_tell(stream: *mut sys::retro_vfs_file_handle) -> i64 {
    let Some(file) = (unsafe { file_arg(stream) }) else {
        return -1;
    };
    io_result(file.file.stream_position())
}

unsafe extern "C" fn cb_seek(
    stream: *mut sys::retro_vfs_file_handle,
    offset: i64,
    seek_position: c_int,
) -> i64 {
    let Some(file) = (unsafe { file_arg(stream) }) else {
        return -1;
    };
    let from = match seek_position {
        sys::RETRO_VFS_SEEK_POSITION_START => match u64::try_from(offset) {
            Ok(offset) => SeekFrom::Start(offset),
            Err(_) => return -1,
        },
        sys::RETRO_VFS_SEEK_POSITION_CURRENT => SeekFrom::Current(offset),
        sys::RETRO_VFS_SEEK_POSITION_END => SeekFrom::End(offset),
        _ => return -1,
    };
    io_result(file.file.seek(from))
}

unsafe extern "C" fn cb_read(
    stream: *mut sys::retro_vfs_file_handle,
    s: *mut c_void,
    len: u64,
) -> i64 {
    let Some(file) = (unsafe { file_arg(stream) }) else {
        return -1;
    };
    let Ok(len) = usize::try_from(len) else {
        return -1;
    };
    if len == 0 {
        return 0;
    }
    if s.is_null() {
        return -1;
    }
    let buf = unsafe { std::slice::from_raw_parts_mut(s.cast::<u8>(), len) };

    let mut filled = 0;
    while filled < buf.len() {
        match file.file.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(err) => return io_result(Err(err)),
        }
    }
    filled as i64
}

unsafe extern "C" fn cb_write(
    stream: *mut sys::retro_vfs_file_handle,
    s: *const c_void,
    len: u64,
) -> i64 {
    let Some(file) = (unsafe { file_arg(stream) }) else {
        return -1;
    };
    let Ok(len) = usize::try_from(len) else {
        return -1;
    };
    if len == 0 {
        return 0;
    }
    if s.is_null() {
        return -1;
    }
    let buf = unsafe { std::slice::from_raw_parts(s.cast::<u8>(), len) };
    io_result(file.file.write_all(buf).map(|()| len as u64))
}

unsafe extern "C" fn cb_flush(stream: *mut sys::retro_vfs_file_handle) -> c_int {
    let Some(file) = (unsafe { file_arg(stream) }) else {
        return -1;
    };
    match file.file.flush() {
        Ok(()) => 0,
        Err(_) => -1,
    }
}

unsafe extern "C" fn cb_remove(path: *const c_char) -> c_int {
    let Some(path) = (unsafe { path_arg(path) }) else {
        return -1;
    };
    let result = if path.is_dir() {
        fs::remove_dir(path)
    } else {
        fs::remove_file(path)
    };
    match result {
        Ok(()) => 0,
        Err(_) => -1,
    }
}

unsafe extern "C" fn cb_rename(old_path: *const c_char, new_path: *const c_char) -> c_int {
    let (Some(old_path), Some(new_path)) = (unsafe { path_arg(old_path) }, unsafe {
        path_arg(new_path)
    }) else {
        return -1;
    };
    match fs::rename(old_path, new_path) {
        Ok(()) => 0,
        Err(_) => -1,
    }
}

/// `stat` flags for a path, plus its size clamped to `i32`. 0 when missing.
pub fn stat_path(path: &Path) -> (c_int, i32) {
    match fs::metadata(path) {
        Ok(meta) => {
            let mut flags = sys::RETRO_VFS_STAT_IS_VALID;
            if meta.is_dir() {
                flags |= sys::RETRO_VFS_STAT_IS_DIRECTORY;
            }
            #[cfg(unix)]
            {
                use std::os::unix::fs::FileTypeExt;
                if meta.file_type().is_char_device() {
                    flags |= sys::RETRO_VFS_STAT_IS_CHARACTER_SPECIAL;
                }
            }
            (flags, i32::try_from(meta.len()).unwrap_or(i32::MAX))
        }
        Err(_) => (0, 0),
    }
}

unsafe extern "C" fn cb_stat(path: *const c_char, size: *mut i32) -> c_int {
    let Some(path) = (unsafe { path_arg(path) }) else {
        return 0;
    };
    let (flags, len) = stat_path(path);
    if flags != 0 && !size.is_null() {
        unsafe { *size = len };
    }
    flags
}

/// 0 on success, -2 if something already exists at `dir`, -1 otherwise.
pub fn make_dir(dir: &Path) -> c_int {
    match fs::create_dir(dir) {
        Ok(()) => 0,
        Err(err) if err.kind() == io::ErrorKind::AlreadyExists => -2,
        Err(_) => -1,
    }
}

unsafe extern "C" fn cb_mkdir(dir: *const c_char) -> c_int {
    match unsafe { path_arg(dir) } {
        Some(dir) => make_dir(dir),
        None => -1,
    }
}

impl VfsDir {
    /// Snapshots the entries of `dir`. Dot-files are skipped unless
    /// `include_hidden` is set.
    pub fn open(dir: &Path, include_hidden: bool) -> io::Result<Self> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let name = entry.file_name();
            let bytes = name.as_encoded_bytes();
            if !include_hidden && bytes.first() == Some(&b'.') {
                continue;
            }
            let Ok(name) = CString::new(bytes) else {
                continue;
            };
            let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
            entries.push(DirEntry { name, is_dir });
        }
        Ok(Self {
            entries,
            cursor: None,
        })
    }

    /// Moves to the next entry. `false` once the listing is exhausted.
    pub fn advance(&mut self) -> bool {
        let next = self.cursor.map_or(0, |i| i + 1);
        self.cursor = Some(next.min(self.entries.len()));
        next < self.entries.len()
    }

    fn current(&self) -> Option<&DirEntry> {
        self.entries.get(self.cursor?)
    }

    pub fn current_name(&self) -> Option<&CStr> {
        self.current().map(|entry| entry.name.as_c_str())
    }

    pub fn current_is_dir(&self) -> bool {
        self.current().is_some_and(|entry| entry.is_dir)
    }
}

unsafe extern "C" fn cb_opendir(
    dir: *const c_char,
    include_hidden: bool,
) -> *mut sys::retro_vfs_dir_handle {
    let Some(dir) = (unsafe { path_arg(dir) }) else {
        return ptr::null_mut();
    };
    match VfsDir::open(dir, include_hidden) {
        Ok(listing) => Box::into_raw(Box::new(listing)).cast(),
        Err(err) => {
            debug!("VFS: opendir {} failed: {err}", dir.display());
            ptr::null_mut()
        }
    }
}

unsafe extern "C" fn cb_readdir(dir: *mut sys::retro_vfs_dir_handle) -> bool {
    unsafe { dir_arg(dir) }.is_some_and(VfsDir::advance)
}

unsafe extern "C" fn cb_dirent_get_name(dir: *mut sys::retro_vfs_dir_handle) -> *const c_char {
    unsafe { dir_arg(dir) }
        .and_then(|dir| dir.current_name())
        .map_or(ptr::null(), CStr::as_ptr)
}

unsafe extern "C" fn cb_dirent_is_dir(dir: *mut sys::retro_vfs_dir_handle) -> bool {
    unsafe { dir_arg(dir) }.is_some_and(|dir| dir.current_is_dir())
}

unsafe extern "C" fn cb_closedir(dir: *mut sys::retro_vfs_dir_handle) -> c_int {
    if dir.is_null() {
        return -1;
    }
    drop(unsafe { Box::from_raw(dir.cast::<VfsDir>()) });
    0
}

/// The function table handed out for GET_VFS_INTERFACE.
pub static VFS_INTERFACE: sys::retro_vfs_interface = sys::retro_vfs_interface {
    get_path: Some(cb_get_path),
    open: Some(cb_open),
    close: Some(cb_close),
    size: Some(cb_size),
    tell: Some(cb_tell),
    seek: Some(cb_seek),
    read: Some(cb_read),
    write: Some(cb_write),
    flush: Some(cb_flush),
    remove: Some(cb_remove),
    rename: Some(cb_rename),
    truncate: Some(cb_truncate),
    stat: Some(cb_stat),
    mkdir: Some(cb_mkdir),
    opendir: Some(cb_opendir),
    readdir: Some(cb_readdir),
    dirent_get_name: Some(cb_dirent_get_name),
    dirent_is_dir: Some(cb_dirent_is_dir),
    closedir: Some(cb_closedir),
};

/// Fills a GET_VFS_INTERFACE request. `false` for versions newer than ours.
pub(crate) fn fill_interface_info(info: &mut sys::retro_vfs_interface_info) -> bool {
    if info.required_interface_version > sys::RETRO_VFS_INTERFACE_VERSION {
        debug!(
            "Core wants VFS v{}, only v{} is available",
            info.required_interface_version,
            sys::RETRO_VFS_INTERFACE_VERSION
        );
        return false;
    }
    info.required_interface_version = sys::RETRO_VFS_INTERFACE_VERSION;
    info.iface = ptr::addr_of!(VFS_INTERFACE).cast_mut();
    true
}

/// `path` as a C string, `None` if it contains a NUL byte.
pub fn to_c_path(path: &Path) -> Option<CString> {
    CString::new(path.as_os_str().as_encoded_bytes()).ok()
}
