use std::sync::Arc;

use camino::Utf8PathBuf;
use clap::Parser;

use mtlx_assets::asset::AssetName;
use mtlx_assets::import_cache::ImportCache;
use mtlx_assets::manager::{Assets, CacheMode};
use mtlx_assets::material::{MaterialAsset, MtlxLoader};
use mtlx_document::modifiers::DocumentModifiers;
use mtlx_document::paths::{default_search_path, ProjectPaths};
use mtlx_translate::resolver::{PassthroughBaker, Resolver};
use mtlx_translate::translate::RenderablePolicy;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the document to import, relative to the project root.
    #[arg(short, long)]
    path: Utf8PathBuf,
    /// Project root directory.
    #[arg(long, default_value = ".")]
    project: Utf8PathBuf,
    /// Standard library folders to import.
    #[arg(long, default_value = "libraries")]
    libraries: Vec<Utf8PathBuf>,
    /// Override the bake width.
    #[arg(long)]
    bake_width: Option<u32>,
    /// Override the bake height.
    #[arg(long)]
    bake_height: Option<u32>,
    /// Request a high-dynamic-range bake.
    #[arg(long, default_value_t = false)]
    hdr: bool,
    /// Element remappings, as `old:new` pairs.
    #[arg(long)]
    remap: Vec<String>,
    /// Elements to remove from the document before baking.
    #[arg(long)]
    skip: Vec<String>,
    /// Enforced file prefix terminator.
    #[arg(long, default_value = "")]
    terminator: String,
    /// Fail when the document has more than one renderable shading node.
    #[arg(long, default_value_t = false)]
    strict: bool,
    /// Re-import even when an import cache entry already exists.
    #[arg(long, default_value_t = false)]
    force: bool,
}

fn main() {
    let args = Args::parse();
    mtlx_log::init(mtlx_log::LevelFilter::Info);

    let project = ProjectPaths::new(args.project.canonicalize_utf8().unwrap());

    let mut modifiers = DocumentModifiers::default();
    for pair in &args.remap {
        match pair.split_once(':') {
            Some((old, new)) => {
                modifiers.remap_elements.insert(old.into(), new.into());
            }
            None => panic!("invalid remap pair '{pair}', expected 'old:new'"),
        }
    }
    for element in &args.skip {
        modifiers.skip_elements.insert(element.clone());
    }
    modifiers.file_prefix_terminator = args.terminator.clone();

    let mut resolver = Resolver::new(Arc::new(PassthroughBaker));
    resolver.search_path = default_search_path(&project);
    resolver.library_folders = args.libraries.clone();
    resolver.modifiers = modifiers;
    resolver.settings.width = args.bake_width;
    resolver.settings.height = args.bake_height;
    resolver.settings.hdr = args.hdr;

    let policy = if args.strict {
        RenderablePolicy::Strict
    } else {
        RenderablePolicy::FirstMatch
    };

    let assets = Assets::new(project.clone());
    assets.register::<MaterialAsset>(MtlxLoader::new(resolver).with_policy(policy));

    let name: &AssetName = args.path.as_path();
    let cache = ImportCache::new(&project, name);
    let mode = if args.force {
        CacheMode::Ignore
    } else {
        CacheMode::Reuse
    };

    println!("Importing {}...", args.path);
    let handle = assets.load_with::<MaterialAsset>(name, mode).unwrap();

    let material = &handle.material;
    println!("Imported to {}", cache.dir());
    println!("  albedo: {}", material.albedo);
    println!("  metallic: {}", material.metallic);
    println!("  roughness: {}", material.roughness);
    println!("  textures: {}", material.textures().count());
    println!("Done!");
}
