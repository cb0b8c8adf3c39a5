use std::ffi::CString;
use std::io;
#[cfg(any(target_os = "linux", target_os = "android"))]
use std::os::fd::AsRawFd;
use std::os::unix::ffi::OsStrExt;

use panel_trust::VerifiedTarget;

/// Replace the process image with the verified target.
///
/// Executes the descriptor the trust checks ran against, so a path swapped
/// underneath the wrapper after verification cannot redirect the dispatch.
/// argv carries only the script path; the caller's argument reaches the
/// script exclusively through the sanitized environment.
///
/// Returns only on failure.
pub(crate) fn exec_verified(target: &VerifiedTarget, child_env: &[(String, String)]) -> io::Error {
    let argv0 = match CString::new(target.path().as_os_str().as_bytes()) {
        Ok(argv0) => argv0,
        Err(_) => return io::Error::from(io::ErrorKind::InvalidInput),
    };

    let mut envp = Vec::with_capacity(child_env.len());
    for (key, value) in child_env {
        match CString::new(format!("{key}={value}")) {
            Ok(entry) => envp.push(entry),
            Err(_) => return io::Error::from(io::ErrorKind::InvalidInput),
        }
    }

    let argv_ptrs = [argv0.as_ptr(), std::ptr::null()];
    let mut envp_ptrs: Vec<*const libc::c_char> = envp.iter().map(|entry| entry.as_ptr()).collect();
    envp_ptrs.push(std::ptr::null());

    #[cfg(any(target_os = "linux", target_os = "android"))]
    unsafe {
        libc::fexecve(
            target.file().as_raw_fd(),
            argv_ptrs.as_ptr(),
            envp_ptrs.as_ptr(),
        );
    }
    // Platforms without fexecve fall back to the path the descriptor was
    // opened from; the ownership check still ran against that inode.
    #[cfg(not(any(target_os = "linux", target_os = "android")))]
    unsafe {
        libc::execve(argv0.as_ptr(), argv_ptrs.as_ptr(), envp_ptrs.as_ptr());
    }

    io::Error::last_os_error()
}
