/// The resource axes the sandboxed runner constrains in the child before
/// `exec`. Only async-signal-safe calls may run between `fork` and `exec`,
/// so this stays a thin wrapper over `setrlimit` rather than anything that
/// allocates or logs.
#[derive(Debug, Clone, Copy)]
pub enum Resource {
    Cpu,
    AddressSpace,
    FileSize,
}

impl Resource {
    fn native(self) -> libc::c_int {
        match self {
            Resource::Cpu => libc::RLIMIT_CPU,
            Resource::AddressSpace => libc::RLIMIT_AS,
            Resource::FileSize => libc::RLIMIT_FSIZE,
        }
    }
}

/// Installs both the soft and hard limit for `resource`. Failures are
/// ignored: the wall-clock watchdog in the parent is the hard backstop, and
/// these rlimits are a best-effort secondary guard.
///
/// # Safety
/// Must only be called between `fork` and `exec` (i.e. from a
/// `pre_exec` hook). `setrlimit` is async-signal-safe.
pub unsafe fn set_limit(resource: Resource, soft: u64, hard: u64) {
    let limit = libc::rlimit {
        rlim_cur: soft as libc::rlim_t,
        rlim_max: hard as libc::rlim_t,
    };
    unsafe {
        libc::setrlimit(resource.native(), &limit);
    }
}
