//! Common utilities for benchmarks

use criterion::Criterion;
use pprof::criterion::{Output, PProfProfiler};
use vetch_core::{
    Distribution, RequiredVersion, Requirement, RequirementCollection, RequirementSpec,
    StaticEnvironment,
};

/// Configure criterion with flamegraph profiling support
pub fn criterion_config() -> Criterion {
    Criterion::default()
        .warm_up_time(std::time::Duration::from_secs(3))
        .measurement_time(std::time::Duration::from_secs(10))
        .sample_size(100)
        .with_profiler(PProfProfiler::new(100, Output::Flamegraph(None)))
}

pub fn package_name(index: usize) -> String {
    format!("package-{}", index)
}

/// A layered environment: every package requires up to `fan_out` packages
/// with higher indices, so the graph is acyclic.
pub fn layered_environment(size: usize, fan_out: usize) -> StaticEnvironment {
    (0..size)
        .map(|index| {
            let mut distribution = Distribution::new(package_name(index), "1.0.0");
            for target in (index + 1..size).take(fan_out) {
                let spec = RequirementSpec::new(package_name(target), RequiredVersion::any());
                distribution = distribution.with_requirement(spec);
            }
            distribution
        })
        .collect()
}

/// Rings of `ring_size` packages, each closing back on its first member
pub fn cyclic_environment(rings: usize, ring_size: usize) -> StaticEnvironment {
    (0..rings)
        .flat_map(|ring| {
            (0..ring_size).map(move |offset| {
                let index = ring * ring_size + offset;
                let next = ring * ring_size + (offset + 1) % ring_size;
                let spec = RequirementSpec::new(package_name(next), RequiredVersion::any());
                Distribution::new(package_name(index), "1.0.0").with_requirement(spec)
            })
        })
        .collect()
}

/// Every package pins its successor to a version that is not installed
pub fn conflicting_environment(size: usize) -> StaticEnvironment {
    (0..size)
        .map(|index| {
            let mut distribution = Distribution::new(package_name(index), "1.0.0");
            if index + 1 < size {
                let version = if index % 2 == 0 { ">=2.0" } else { "<2.0" };
                if let Ok(required) = RequiredVersion::from_string(version) {
                    distribution = distribution
                        .with_requirement(RequirementSpec::new(package_name(index + 1), required));
                }
            }
            distribution
        })
        .collect()
}

/// Top-level requirements naming the first `count` packages
pub fn top_level_requirements(count: usize) -> RequirementCollection {
    (0..count)
        .filter_map(|index| Requirement::from_requirement_string(&package_name(index)).ok())
        .collect()
}

/// Requirement file text mixing pins, ranges, comments and options
pub fn requirements_file_content(lines: usize) -> String {
    let patterns = ["=={}.0.0", ">={}.0,<{}.5", "~={}.2", "", "!={}.1.0"];
    let mut content = String::from("# generated\n-i https://example.invalid/simple\n");

    for index in 0..lines {
        let pattern = patterns[index % patterns.len()];
        let major = index % 7 + 1;
        let specifier = pattern.replace("{}", &major.to_string());
        content.push_str(&format!("{}{}  # line {}\n", package_name(index), specifier, index));
    }
    content
}
