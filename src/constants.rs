/// Move target of the mint call: `<package>::loyalty_card::mint_loyalty`
pub const MINT_MODULE: &str = "loyalty_card";
pub const MINT_FUNCTION: &str = "mint_loyalty";

/// Image argument passed to `mint_loyalty` unless `--image-url` overrides it
pub const PLACEHOLDER_IMAGE_URL: &str = "https://placehold.co/512x512.png?text=Loyalty+Card";

// Global constants
pub const GAS_BUDGET: u64 = 100_000_000;

pub const SUI_DECIMALS: f64 = 1_000_000_000.0;
pub const LOG_MAX_LINES: usize = 1000;
pub const EVENT_POLL_MILLIS: u64 = 50;
pub const MESSAGE_AREA_MARGIN: u16 = 4;

pub const DEFAULT_LOG_FILE: &str = "loyalty-mint.log";
pub const CLIENT_CONFIG_FILE: &str = "client.yaml";
pub const KEYSTORE_FILE: &str = "sui.keystore";

/// Index into `NETWORKS` used when no `--network` is given (testnet)
pub const DEFAULT_NETWORK: usize = 1;

pub const NETWORKS: [(&str, &str); 3] = [
    ("devnet", "https://fullnode.devnet.sui.io:443"),
    ("testnet", "https://fullnode.testnet.sui.io:443"),
    ("mainnet", "https://fullnode.mainnet.sui.io:443"),
];
