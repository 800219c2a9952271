//! WGSL sources parse, validate and agree with the Rust uniform layouts

use backdrop_engine::renderer::{GlassUniforms, LatticeUniforms};
use backdrop_engine::shaders::{GLASS_FRAGMENT, GLASS_VERTEX, LATTICE_FRAGMENT, LATTICE_VERTEX};

fn validate(source: &str) -> naga::Module {
    let module = match naga::front::wgsl::parse_str(source) {
        Ok(module) => module,
        Err(e) => panic!("{}", e.emit_to_string(source)),
    };
    naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::empty(),
    )
    .validate(&module)
    .unwrap_or_else(|e| panic!("{}", e.into_inner()));
    module
}

fn struct_size(module: &naga::Module, name: &str) -> u32 {
    let mut layouter = naga::proc::Layouter::default();
    layouter.update(module.to_ctx()).unwrap();
    let (handle, _) = module
        .types
        .iter()
        .find(|(_, ty)| ty.name.as_deref() == Some(name))
        .unwrap_or_else(|| panic!("struct {} not declared", name));
    layouter[handle].size
}

fn has_entry(module: &naga::Module, name: &str, stage: naga::ShaderStage) -> bool {
    module
        .entry_points
        .iter()
        .any(|ep| ep.name == name && ep.stage == stage)
}

// =============================================================================
// Validation
// =============================================================================

#[test]
fn test_lattice_stages_validate() {
    let vs = validate(LATTICE_VERTEX);
    let fs = validate(LATTICE_FRAGMENT);
    assert!(has_entry(&vs, "vs_main", naga::ShaderStage::Vertex));
    assert!(has_entry(&fs, "fs_main", naga::ShaderStage::Fragment));
}

#[test]
fn test_glass_stages_validate() {
    let vs = validate(GLASS_VERTEX);
    let fs = validate(GLASS_FRAGMENT);
    assert!(has_entry(&vs, "vs_main", naga::ShaderStage::Vertex));
    assert!(has_entry(&fs, "fs_main", naga::ShaderStage::Fragment));
}

// =============================================================================
// Uniform Layouts
// =============================================================================

#[test]
fn test_lattice_uniforms_match_rust_layout() {
    let expected = std::mem::size_of::<LatticeUniforms>() as u32;
    assert_eq!(struct_size(&validate(LATTICE_VERTEX), "LatticeUniforms"), expected);
    assert_eq!(struct_size(&validate(LATTICE_FRAGMENT), "LatticeUniforms"), expected);
}

#[test]
fn test_glass_uniforms_match_rust_layout() {
    let expected = std::mem::size_of::<GlassUniforms>() as u32;
    assert_eq!(struct_size(&validate(GLASS_FRAGMENT), "GlassUniforms"), expected);
}
