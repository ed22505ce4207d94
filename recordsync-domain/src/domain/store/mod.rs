use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize, Display, EnumString, AsRefStr)]
pub enum Store {
    #[strum(serialize = "records")]
    Records,
}
