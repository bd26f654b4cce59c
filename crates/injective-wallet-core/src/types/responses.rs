/*
[INPUT]:  Broadcaster results and serde requirements
[OUTPUT]: Typed transaction response structs
[POS]:    Data layer - broadcast results
[UPDATE]: When broadcaster response shape changes
*/

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TxResponse {
    pub tx_hash: String,
    #[serde(default)]
    pub height: u64,
    #[serde(default)]
    pub code: u32,
    #[serde(default)]
    pub raw_log: String,
}

impl TxResponse {
    pub fn is_success(&self) -> bool {
        self.code == 0
    }
}
