//! Built-in defaults and well-known paths

/// Namespace prefix a command line token needs to be considered
pub const NAMESPACE: &str = "rancher";

/// Where the kernel exposes its command line
pub const CMDLINE_PATH: &str = "/proc/cmdline";

/// Id of the console container
pub const CONSOLE_CONTAINER: &str = "console";

/// Docker client binary
pub const DOCKER_BIN: &str = "/usr/bin/docker";

/// Socket of the system docker daemon
pub const DOCKER_SYSTEM_HOST: &str = "unix:///var/run/system-docker.sock";

/// Socket of the user docker daemon
pub const DOCKER_HOST: &str = "unix:///var/run/docker.sock";

/// Directory holding preloaded image archives
pub const IMAGES_PATH: &str = "/";

/// Glob of preloaded image archives inside [`IMAGES_PATH`]
pub const IMAGES_PATTERN: &str = "images*.tar";

/// System init binary
pub const SYS_INIT: &str = "/sbin/init-sys";

/// User init binary
pub const USER_INIT: &str = "/sbin/init-user";

/// Archive of kernel modules
pub const MODULES_ARCHIVE: &str = "/modules.tar";

pub(crate) fn default_console_container() -> String {
    CONSOLE_CONTAINER.to_string()
}
