pub mod index;
pub use index::{
    catalog,
    generate,
    health,
    home,
    internal_error,
    keys,
    keys_json,
    not_found,
};
