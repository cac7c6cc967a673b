pub mod reflect;

pub use reflect::reflect_across_axis;
