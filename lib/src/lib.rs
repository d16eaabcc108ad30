use alloy_sol_types::sol;

pub mod abi;
pub mod address;
pub mod error;
pub mod hashing;
pub mod mint;
pub mod tree;
pub mod types;
pub mod verify;

#[cfg(feature = "std")]
pub mod loader;

pub use abi::*;
pub use address::*;
pub use error::*;
pub use hashing::*;
pub use mint::*;
pub use tree::*;
pub use types::*;
pub use verify::*;

#[cfg(feature = "std")]
pub use loader::*;

sol! {
    /// Entry points of the deployed collection contract used by the mint page.
    interface IAllowlistMint {
        function whitelistMint(bytes32[] calldata proof) external payable;
        function publicMint(uint256 amount) external payable;
        function isWhitelist() external view returns (bool);
        function isPublic() external view returns (bool);
        function publicMintedCount(address owner) external view returns (uint256);
        function totalSupply() external view returns (uint256);
    }
}
