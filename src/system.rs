use std::env;
use std::fs;
use std::process::Command;

use sysinfo::System;

const OS_RELEASE: &str = "/etc/os-release";
const CPUINFO: &str = "/proc/cpuinfo";
const MEMINFO: &str = "/proc/meminfo";

/// Everything the probes need from the outside world, so tests can swap in
/// fixed fakes instead of reading the live host.
pub trait HostEnv {
    fn read_file(&self, path: &str) -> Option<String>;
    fn var(&self, name: &str) -> Option<String>;
    /// Captured stdout of an external command, `None` if it failed to launch.
    fn exec(&self, cmd: &str, args: &[&str]) -> Option<String>;

    // Portable fallbacks for hosts without procfs-style descriptor files.
    fn os_fallback(&self) -> Option<String> {
        None
    }
    fn cpu_fallback(&self) -> Option<String> {
        None
    }
    fn memory_fallback(&self) -> Option<String> {
        None
    }
}

/// The live host: real files, real environment, real processes.
pub struct RealHost;

impl HostEnv for RealHost {
    fn read_file(&self, path: &str) -> Option<String> {
        fs::read_to_string(path).ok()
    }

    fn var(&self, name: &str) -> Option<String> {
        env::var(name).ok()
    }

    fn exec(&self, cmd: &str, args: &[&str]) -> Option<String> {
        let output = Command::new(cmd).args(args).output().ok()?;
        Some(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn os_fallback(&self) -> Option<String> {
        let info = os_info::get();
        Some(format!("{} ({})", info.os_type(), info.version()))
    }

    fn cpu_fallback(&self) -> Option<String> {
        let sys = System::new_all();
        sys.cpus()
            .first()
            .map(|c| c.brand().trim().to_string())
            .filter(|brand| !brand.is_empty())
    }

    fn memory_fallback(&self) -> Option<String> {
        let sys = System::new_all();
        let mb = sys.total_memory() / (1024 * 1024);
        (mb > 0).then(|| format!("{} MB", mb))
    }
}

/// One rendered report line: field key for theme lookups, default label,
/// probed value.
pub struct HostFact {
    pub field: &'static str,
    pub label: &'static str,
    pub value: String,
}

/// Runs all probes in their fixed report order.
pub fn collect(env: &dyn HostEnv) -> Vec<HostFact> {
    [
        ("os", "OS:", os_name(env)),
        ("cpu", "CPU:", cpu_model(env)),
        ("ram", "RAM:", memory_total(env)),
        ("shell", "Shell:", shell(env)),
        ("wm", "WM:", window_manager(env)),
        ("gpu", "GPU:", gpu(env)),
    ]
    .into_iter()
    .map(|(field, label, value)| HostFact { field, label, value })
    .collect()
}

pub fn os_name(env: &dyn HostEnv) -> String {
    if let Some(text) = env.read_file(OS_RELEASE) {
        for line in text.lines() {
            if let Some(name) = line.strip_prefix("PRETTY_NAME=") {
                return name.trim_matches('"').to_string();
            }
        }
    }
    env.os_fallback().unwrap_or_else(|| "Unknown OS".into())
}

pub fn cpu_model(env: &dyn HostEnv) -> String {
    if let Some(text) = env.read_file(CPUINFO) {
        for line in text.lines() {
            if line.starts_with("model name") {
                if let Some((_, model)) = line.split_once(':') {
                    return model.trim().to_string();
                }
            }
        }
    }
    env.cpu_fallback().unwrap_or_else(|| "Unknown CPU".into())
}

pub fn memory_total(env: &dyn HostEnv) -> String {
    if let Some(text) = env.read_file(MEMINFO) {
        for line in text.lines() {
            if line.starts_with("MemTotal") {
                let kib = line
                    .split_whitespace()
                    .nth(1)
                    .and_then(|v| v.parse::<u64>().ok());
                if let Some(kib) = kib {
                    // meminfo reports kB; the report shows whole MB.
                    return format!("{} MB", kib / 1024);
                }
                break;
            }
        }
    }
    env.memory_fallback().unwrap_or_else(|| "Unknown RAM".into())
}

pub fn shell(env: &dyn HostEnv) -> String {
    env.var("SHELL").unwrap_or_else(|| "Unknown Shell".into())
}

pub fn window_manager(env: &dyn HostEnv) -> String {
    env.var("XDG_CURRENT_DESKTOP")
        .or_else(|| env.var("DESKTOP_SESSION"))
        .unwrap_or_else(|| "Unknown WM".into())
}

/// Video-class entries from `lspci`, description field only. The filtering
/// happens in-process rather than through a grep/cut pipeline.
pub fn gpu(env: &dyn HostEnv) -> String {
    let Some(listing) = env.exec("lspci", &[]) else {
        log::debug!("lspci failed to launch");
        return "Unknown GPU".into();
    };
    let gpus: Vec<String> = listing
        .lines()
        .filter(|line| line.contains(" VGA ") || line.contains("3D controller"))
        .filter_map(|line| line.rsplit(':').next())
        .map(|desc| desc.trim().to_string())
        .filter(|desc| !desc.is_empty())
        .collect();
    if gpus.is_empty() {
        "Unknown GPU".into()
    } else {
        gpus.join(", ")
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::collections::HashMap;

    /// Fixed-answer host for deterministic probe tests.
    #[derive(Default)]
    pub struct FakeHost {
        pub files: HashMap<&'static str, String>,
        pub vars: HashMap<&'static str, String>,
        pub lspci: Option<String>,
    }

    impl HostEnv for FakeHost {
        fn read_file(&self, path: &str) -> Option<String> {
            self.files.get(path).cloned()
        }

        fn var(&self, name: &str) -> Option<String> {
            self.vars.get(name).cloned()
        }

        fn exec(&self, cmd: &str, _args: &[&str]) -> Option<String> {
            assert_eq!(cmd, "lspci");
            self.lspci.clone()
        }
    }

    #[test]
    fn os_name_from_pretty_name() {
        let mut host = FakeHost::default();
        host.files.insert(
            OS_RELEASE,
            "NAME=\"Arch Linux\"\nPRETTY_NAME=\"Arch Linux\"\nID=arch\n".into(),
        );
        assert_eq!(os_name(&host), "Arch Linux");
    }

    #[test]
    fn os_name_sentinel_when_file_missing() {
        assert_eq!(os_name(&FakeHost::default()), "Unknown OS");
    }

    #[test]
    fn os_name_sentinel_when_line_missing() {
        let mut host = FakeHost::default();
        host.files.insert(OS_RELEASE, "NAME=\"Arch Linux\"\n".into());
        assert_eq!(os_name(&host), "Unknown OS");
    }

    #[test]
    fn cpu_model_after_colon_trimmed() {
        let mut host = FakeHost::default();
        host.files.insert(
            CPUINFO,
            "processor\t: 0\nmodel name\t: AMD Ryzen 7 5800X 8-Core Processor\nstepping\t: 2\n"
                .into(),
        );
        assert_eq!(cpu_model(&host), "AMD Ryzen 7 5800X 8-Core Processor");
    }

    #[test]
    fn cpu_model_sentinel() {
        assert_eq!(cpu_model(&FakeHost::default()), "Unknown CPU");
    }

    #[test]
    fn memory_total_integer_division() {
        let mut host = FakeHost::default();
        host.files.insert(
            MEMINFO,
            "MemTotal:        8192000 kB\nMemFree:         123456 kB\n".into(),
        );
        assert_eq!(memory_total(&host), "8000 MB");
    }

    #[test]
    fn memory_total_rounds_down() {
        let mut host = FakeHost::default();
        host.files.insert(MEMINFO, "MemTotal: 1535 kB\n".into());
        assert_eq!(memory_total(&host), "1 MB");
    }

    #[test]
    fn memory_total_sentinel() {
        assert_eq!(memory_total(&FakeHost::default()), "Unknown RAM");
    }

    #[test]
    fn shell_from_env() {
        let mut host = FakeHost::default();
        host.vars.insert("SHELL", "/usr/bin/zsh".into());
        assert_eq!(shell(&host), "/usr/bin/zsh");
        assert_eq!(shell(&FakeHost::default()), "Unknown Shell");
    }

    #[test]
    fn wm_prefers_xdg_then_session() {
        let mut host = FakeHost::default();
        host.vars.insert("XDG_CURRENT_DESKTOP", "Hyprland".into());
        host.vars.insert("DESKTOP_SESSION", "plasma".into());
        assert_eq!(window_manager(&host), "Hyprland");

        let mut host = FakeHost::default();
        host.vars.insert("DESKTOP_SESSION", "plasma".into());
        assert_eq!(window_manager(&host), "plasma");

        assert_eq!(window_manager(&FakeHost::default()), "Unknown WM");
    }

    #[test]
    fn gpu_filters_video_entries() {
        let mut host = FakeHost::default();
        host.lspci = Some(
            concat!(
                "00:1f.4 SMBus: Intel Corporation Device 43a3\n",
                "01:00.0 VGA compatible controller: NVIDIA Corporation GA104 [GeForce RTX 3070]\n",
                "02:00.0 3D controller: NVIDIA Corporation GP107M\n",
            )
            .into(),
        );
        assert_eq!(
            gpu(&host),
            "NVIDIA Corporation GA104 [GeForce RTX 3070], NVIDIA Corporation GP107M"
        );
    }

    #[test]
    fn gpu_sentinel_on_empty_or_failed_listing() {
        let mut host = FakeHost::default();
        host.lspci = Some("00:1f.4 SMBus: Intel Corporation Device 43a3\n".into());
        assert_eq!(gpu(&host), "Unknown GPU");

        host.lspci = None;
        assert_eq!(gpu(&host), "Unknown GPU");
    }

    #[test]
    fn collect_order_and_labels() {
        let facts = collect(&FakeHost::default());
        let keys: Vec<_> = facts.iter().map(|f| f.field).collect();
        assert_eq!(keys, ["os", "cpu", "ram", "shell", "wm", "gpu"]);
        let labels: Vec<_> = facts.iter().map(|f| f.label).collect();
        assert_eq!(labels, ["OS:", "CPU:", "RAM:", "Shell:", "WM:", "GPU:"]);
    }
}
