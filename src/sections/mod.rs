pub mod assemble;
pub mod mapper;

pub use assemble::assemble;
pub use mapper::{
    FeaturesVariant, HeroVariant, icon_for_feature, map_features_variant, map_hero_variant,
    map_section,
};
