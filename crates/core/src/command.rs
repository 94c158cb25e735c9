//! Generator command construction
//!
//! One shell-invocable cmake line per platform variant. The layouts are
//! load-bearing: downstream build scripts grep these invocations, so each
//! variant keeps its historical parameter order and quoting style.

use tracing::debug;

use crate::config::BuildConfig;
use crate::error::CoreError;
use develop_platform::Os;

/// Visual Studio generator table: identifier -> (generator string, toolset)
fn toolset_for(generator: &str) -> Option<(&'static str, &'static str)> {
    match generator.to_ascii_lowercase().as_str() {
        "vs2022" => Some(("Visual Studio 17 2022", "v143")),
        "vs2022-clang" => Some(("Visual Studio 17 2022", "ClangCL")),
        _ => None,
    }
}

/// Fail early when a Windows-family generator has no toolset entry, before
/// any directory is created or process spawned
pub fn validate_generator(os: Os, config: &BuildConfig) -> Result<(), CoreError> {
    if os.is_windows_family() && toolset_for(&config.generator).is_none() {
        return Err(CoreError::UnknownGenerator {
            name: config.generator.clone(),
        });
    }
    Ok(())
}

/// Quote extra options for the generator command line.
///
/// Each option is wrapped in double quotes with any literal double-quote
/// characters stripped (not escaped); callers cannot rely on embedded
/// quotes surviving.
pub fn quote_opts(opts: &[String]) -> String {
    let quoted: Vec<String> = opts
        .iter()
        .map(|opt| format!("\"{}\"", opt.replace('"', "")))
        .collect();
    quoted.join(" ")
}

/// Build the cmake command line for a platform variant.
///
/// `src_dir` must already be in the form the generator expects (the cygwin
/// strategy rewrites it through `cygpath -w` first). `ambient_cxx` is the
/// value of `CXX` in the environment, if any; the linux variant forces
/// `CXX='g++'` only when none is already declared.
pub fn cmake_command(
    os: Os,
    config: &BuildConfig,
    src_dir: &str,
    extra_opts: &[String],
    ambient_cxx: Option<&str>,
) -> Result<String, CoreError> {
    let mut parts: Vec<String> = vec!["cmake".to_string()];
    match os {
        Os::Unix => {
            parts.push(format!("-DCMAKE_BUILD_TYPE:STRING={}", config.build_type.cmake_label()));
            parts.push(format!("-DUSESYSTEMLIBS:BOOL={}", config.systemlibs_label()));
            parts.push(format!("-G '{}'", config.generator));
        }
        Os::Linux => {
            parts.push(format!("-DCMAKE_BUILD_TYPE:STRING={}", config.build_type.cmake_label()));
            parts.push(format!("-G '{}'", config.generator));
            parts.push(format!("-DUSESYSTEMLIBS:BOOL={}", config.systemlibs_label()));
            parts.push(format!("-DROOT_PROJECT_NAME:STRING={}", config.project_name));
        }
        Os::Darwin => {
            parts.push(format!("-G '{}'", config.generator));
            parts.push(format!("-DCMAKE_BUILD_TYPE:STRING={}", config.build_type.cmake_label()));
            parts.push(format!("-DUSESYSTEMLIBS:BOOL={}", config.systemlibs_label()));
            parts.push(format!("-DROOT_PROJECT_NAME:STRING={}", config.project_name));
        }
        Os::Windows => {
            let (gen_name, toolset) = toolset_for(&config.generator).ok_or_else(|| {
                CoreError::UnknownGenerator {
                    name: config.generator.clone(),
                }
            })?;
            parts.push(format!("-G \"{gen_name}\""));
            parts.push(format!("-T {toolset}"));
            parts.push(format!("-DUSESYSTEMLIBS:BOOL={}", config.systemlibs_label()));
            parts.push(format!("-DROOT_PROJECT_NAME:STRING={}", config.project_name));
        }
        Os::Cygwin => {
            // Multi-config generator: no -T here, and no build type either.
            let (gen_name, _toolset) = toolset_for(&config.generator).ok_or_else(|| {
                CoreError::UnknownGenerator {
                    name: config.generator.clone(),
                }
            })?;
            parts.push(format!("-G \"{gen_name}\""));
            parts.push(format!("-DUSESYSTEMLIBS:BOOL={}", config.systemlibs_label()));
            parts.push(format!("-DROOT_PROJECT_NAME:STRING={}", config.project_name));
        }
    }
    if !extra_opts.is_empty() {
        parts.push(quote_opts(extra_opts));
    }
    if os.is_windows_family() {
        parts.push(format!("\"{src_dir}\""));
    } else {
        parts.push(format!("'{src_dir}'"));
    }

    let mut command = parts.join(" ");
    if os == Os::Linux && ambient_cxx.is_none() {
        command = format!("CXX='g++' {command}");
    }
    debug!(command = %command, "generator command");
    Ok(command)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BuildType;

    fn opts(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn quote_opts_strips_embedded_quotes() {
        assert_eq!(
            quote_opts(&opts(&["-DNO_FATAL_WARNINGS:BOOL=TRUE", "-DX=\"a b\""])),
            "\"-DNO_FATAL_WARNINGS:BOOL=TRUE\" \"-DX=a b\""
        );
    }

    #[test]
    fn unix_command_layout() {
        let config = BuildConfig::for_os(Os::Unix);
        let cmd = cmake_command(Os::Unix, &config, "/work/src", &[], None).unwrap();
        assert_eq!(
            cmd,
            "cmake -DCMAKE_BUILD_TYPE:STRING=RELEASE -DUSESYSTEMLIBS:BOOL=OFF \
             -G 'Unix Makefiles' '/work/src'"
        );
    }

    #[test]
    fn linux_command_forces_cxx_only_when_unset() {
        let mut config = BuildConfig::for_os(Os::Linux);
        config.build_type = BuildType::Debug;
        config.systemlibs = true;

        let cmd = cmake_command(Os::Linux, &config, "/work/src", &[], None).unwrap();
        assert!(cmd.starts_with("CXX='g++' cmake -DCMAKE_BUILD_TYPE:STRING=DEBUG"));
        assert!(cmd.contains("-DUSESYSTEMLIBS:BOOL=ON"));
        assert!(cmd.contains("-DROOT_PROJECT_NAME:STRING=CoolVLViewer"));
        assert!(cmd.ends_with("'/work/src'"));

        let cmd = cmake_command(Os::Linux, &config, "/work/src", &[], Some("clang++")).unwrap();
        assert!(cmd.starts_with("cmake "), "ambient CXX must be respected: {cmd}");
    }

    #[test]
    fn darwin_command_always_overrides_project_name() {
        let mut config = BuildConfig::for_os(Os::Darwin);
        config.project_name = "TestViewer".to_string();
        let cmd = cmake_command(Os::Darwin, &config, "/work/src", &[], None).unwrap();
        assert_eq!(
            cmd,
            "cmake -G 'Xcode' -DCMAKE_BUILD_TYPE:STRING=RELEASE \
             -DUSESYSTEMLIBS:BOOL=OFF -DROOT_PROJECT_NAME:STRING=TestViewer '/work/src'"
        );
    }

    #[test]
    fn windows_command_resolves_toolset() {
        let mut config = BuildConfig::for_os(Os::Windows);
        config.generator = "vs2022-clang".to_string();
        let cmd = cmake_command(Os::Windows, &config, "C:\\work\\src", &[], None).unwrap();
        assert!(cmd.contains("-G \"Visual Studio 17 2022\""));
        assert!(cmd.contains("-T ClangCL"));
        assert!(cmd.ends_with("\"C:\\work\\src\""));
    }

    #[test]
    fn cygwin_command_has_no_toolset_flag() {
        let config = BuildConfig::for_os(Os::Cygwin);
        let cmd = cmake_command(Os::Cygwin, &config, "C:\\work\\src", &[], None).unwrap();
        assert!(cmd.contains("-G \"Visual Studio 17 2022\""));
        assert!(!cmd.contains("-T "));
    }

    #[test]
    fn unknown_generator_is_rejected_before_running() {
        let mut config = BuildConfig::for_os(Os::Windows);
        config.generator = "vs2019".to_string();
        assert!(matches!(
            validate_generator(Os::Windows, &config),
            Err(CoreError::UnknownGenerator { .. })
        ));
        assert!(matches!(
            cmake_command(Os::Windows, &config, "C:\\src", &[], None),
            Err(CoreError::UnknownGenerator { .. })
        ));
        // Non-windows platforms take the generator name verbatim.
        let config = BuildConfig::for_os(Os::Linux);
        assert!(validate_generator(Os::Linux, &config).is_ok());
    }

    #[test]
    fn extra_opts_are_quoted_in_place() {
        let config = BuildConfig::for_os(Os::Unix);
        let cmd = cmake_command(
            Os::Unix,
            &config,
            "/src",
            &opts(&["-DNO_FATAL_WARNINGS:BOOL=TRUE"]),
            None,
        )
        .unwrap();
        assert!(cmd.contains("\"-DNO_FATAL_WARNINGS:BOOL=TRUE\" '/src'"));
    }
}
