use std::ffi::CString;

/// Resolve a user name to a uid through the passwd database.
///
/// Unresolvable names (including NSS failures) collapse to `None`, which
/// narrows the ownership policy to root-only rather than widening it.
pub(crate) fn uid_of(name: &str) -> Option<u32> {
    let c_name = CString::new(name).ok()?;
    let mut buf_len: usize = 1024;
    loop {
        let mut passwd: libc::passwd = unsafe { std::mem::zeroed() };
        let mut buf = vec![0u8; buf_len];
        let mut result: *mut libc::passwd = std::ptr::null_mut();
        let rc = unsafe {
            libc::getpwnam_r(
                c_name.as_ptr(),
                &mut passwd,
                buf.as_mut_ptr().cast::<libc::c_char>(),
                buf.len(),
                &mut result,
            )
        };
        if rc == libc::ERANGE && buf_len < 1 << 16 {
            buf_len *= 2;
            continue;
        }
        if rc != 0 || result.is_null() {
            return None;
        }
        return Some(passwd.pw_uid);
    }
}
