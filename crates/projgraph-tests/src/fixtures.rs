//! Project tree fixtures
//!
//! Trees modelled on real mobile build layouts: one application, a handful of
//! plugin libraries, and the legacy plugin that ships without a namespace.

/// Application plus three plugins; the isar plugin relies on the namespace table
pub const PLUGIN_TREE: &str = r#"
[root]
name = "case100"
build_dir = "../build"

[defaults]
compile_sdk = 36
min_sdk = 24
target_sdk = 35
jvm_target = "17"

[defaults.namespaces]
"dev.isar.isar_flutter_libs" = "dev.isar.isar_flutter_libs"

[[project]]
path = ":app"
role = "application"
group = "com.sensor"
namespace = "com.sensor.case100"
jvm_target = "17"

[project.sdk]
compile = 36
min = 24
target = 35

[project.build_types.release]
signing_config = "debug"
minify_enabled = false
shrink_resources = false

[[project]]
path = ":isar_flutter_libs"
role = "library"
group = "dev.isar.isar_flutter_libs"

[[project]]
path = ":path_provider_android"
role = "library"
group = "io.flutter.plugins.pathprovider"
namespace = "io.flutter.plugins.pathprovider"

[project.sdk]
min = 21

[[project]]
path = ":sqflite_android"
role = "library"
group = "com.tekartik.sqflite"
namespace = ""
"#;

/// Nested feature modules under a grouping project
pub const NESTED_TREE: &str = r#"
[root]
name = "nested"

[[project]]
path = ":app"
role = "application"

[[project]]
path = ":feature"
role = "library"

[[project]]
path = ":feature:auth"
role = "library"
evaluation_depends_on = [":feature"]

[[project]]
path = ":feature:billing"
role = "library"
evaluation_depends_on = [":feature:auth"]
"#;

/// Two libraries that wait on each other
pub const CYCLIC_TREE: &str = r#"
[root]
name = "cyclic"

[[project]]
path = ":app"
role = "application"

[[project]]
path = ":left"
role = "library"
evaluation_depends_on = [":right"]

[[project]]
path = ":right"
role = "library"
evaluation_depends_on = [":left"]
"#;

/// Same leaf name under two parents
pub const COLLIDING_TREE: &str = r#"
[root]
name = "colliding"

[[project]]
path = ":core"
role = "library"

[[project]]
path = ":ui"
role = "library"

[[project]]
path = ":core:common"
role = "library"

[[project]]
path = ":ui:common"
role = "library"
"#;
