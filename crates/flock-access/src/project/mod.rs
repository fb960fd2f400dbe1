//! One projection function per output structure.
//!
//! Every function takes the loaded record (`None` when the store reported it
//! missing) and returns a freshly built structure. None of them fail:
//! denial and absence are both expressed by leaving members out.

mod contact;
mod group;
mod person;
mod profile;

pub use contact::contact_information;
pub use group::{
  category_information, cluster_information, small_group_information,
};
pub use person::{person_details, person_information};
pub use profile::{person_profiles, profile_information, profile_members};
