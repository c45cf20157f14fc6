// GDAL discovery hints for the raster adapter. Linking is done by gdal-sys;
// this only re-runs the build when the variables it reads change.

const GDAL_VARS: [&str; 5] = ["GDAL_HOME", "GDAL_LIB_DIR", "GDAL_INCLUDE_DIR", "GDAL_VERSION", "GDAL_DATA"];

fn main() {
    for var in GDAL_VARS {
        println!("cargo:rerun-if-env-changed={}", var);
    }

    let located = ["GDAL_HOME", "GDAL_LIB_DIR"].iter().any(|var| std::env::var_os(var).is_some());
    if !located {
        println!("cargo:warning=Neither GDAL_HOME nor GDAL_LIB_DIR is set; gdal-sys will probe pkg-config");
    }
}
