use shadow_rs::ShadowBuilder;

fn main() {
    // Build metadata backing `envtree --version`
    ShadowBuilder::builder()
        .build()
        .expect("Failed to generate build metadata");
}
