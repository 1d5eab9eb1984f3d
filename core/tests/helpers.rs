#![allow(unused)]

use bip39::{Language, Mnemonic, Seed};
use log::debug;

use ledger_near_core::{
    apdu::{path::DerivationPath, status::StatusWord},
    dispatch::{handle_apdu, handle_input, Reply},
    engine::{Driver, Engine, UserInput},
};

/// Emulator default mnemonic, derives [`SECRET`] at [`PATH`]
pub const MNEMONIC: &str = "glory promote mansion idle axis finger extra february uncover one trip resource lawn turtle enact monster seven myth punch hobby comfort wild raise skin";

/// Secret key used to generate the reference signatures
pub const SECRET: &str = "188d2ce61071d477a2400558c3612ee68957a80aa2e56c29dc4da2dace58e7d8";

/// Public key for [`SECRET`]
pub const PUBLIC: &str = "c4f5941e81e071c2fd1dae2e71fd3d859d462484391d9a90bf219211dcbb320f";

/// Encoded `m/44'/397'/0'/0'/1'`
pub const PATH: &str = "8000002c8000018d800000008000000080000001";

/// Reference transaction with expected signature under [`SECRET`]
pub struct Vector {
    pub name: &'static str,
    pub tx: Vec<u8>,
    pub signature: Vec<u8>,
}

lazy_static::lazy_static! {
    pub static ref VECTORS: Vec<Vector> = [
        (
            "transfer",
            "12000000626c61626c61746573742e746573746e657400c4f5941e81e071c2fd1dae2e71fd3d859d462484391d9a90bf219211dcbb320f0f7ac5e5c85700001000000073706563756c6f732e746573746e6574a3f5d1167a5c605fed71fc78d4381bef47a5acb3aba6fc9c07d7b8b912fc1e2a010000000300002083c7f60387211a000000000000",
            "e22eea0ee27a2d8e0bdfc72fb6337492d10a78aec15ff3cb6126b2944af920863e0907d5462bf2822a6bb0a62f1bb594e899ac96db7e95386895e91f325c460c",
        ),
        (
            "function_call",
            "12000000626c61626c61746573742e746573746e657400c4f5941e81e071c2fd1dae2e71fd3d859d462484391d9a90bf219211dcbb320f0f7ac5e5c85700001000000073706563756c6f732e746573746e6574a3f5d1167a5c605fed71fc78d4381bef47a5acb3aba6fc9c07d7b8b912fc1e2a01000000020d00000066756e6374696f6e5f6e616d6502000000aabb0f27000000000000f776e542000000000000000000000000",
            "e3329e9411101f0d0556a7106dc55ae10c04e234761e77ef9d78a53652ee8ed3f43c13761e0ea2edd4de21a534930932addb9d3e996b434aa47a3696f1ac2200",
        ),
        (
            "stake",
            "0b0000007369676e65722e6e65617200358c7177d702ee102a3cae18aa84b005bbd03b9188d5312e7d6df8f78d2a6a490f7ac5e5c85700000d00000072656365697665722e6e656172a3f5d1167a5c605fed71fc78d4381bef47a5acb3aba6fc9c07d7b8b912fc1e2a01000000043aba4f0300000000000000000000000000fded04a996ebf5e25e7d6dd4c82edbbb544a397517edea03eadb39fb5211e460",
            "e9a74d73b80de013ca90a2794855fa74d35c33697597905e03a3e1a483f68e5ed8e23dacd0b9ff62b881d7b0543c5dfb453fc2bd4e5dd16c8103e6ec72e3bc07",
        ),
        (
            "add_key_full_access",
            "060000006172746875720053f9afa67ef91539ff38e2b36bbbed2d1dce6e18d06337cf6647389b5477359b0f7ac5e5c85700004000000039383739336364393161336638373066623132366636363238353830386337653039346166636663346564613861393730663636343863646630646264366465a3f5d1167a5c605fed71fc78d4381bef47a5acb3aba6fc9c07d7b8b912fc1e2a0100000005002ffe256fd9a6e815abc3f220163413ac62871ecc5875d87625a35ce7ea65ee2f393000000000000001",
            "003ee4ba2a305db02da9d929c95010e045f1a838dd9550c8e433398f6c8f6f2d71064ccc2b856a0949e2e9d678511a13679b35e787f47b28b68557969ee40b0a",
        ),
        (
            "delete_key",
            "0f00000073706563756c6f736163636f756e7400ffa334478481a4a779c54ee30912f37ac23a323261f431f89d2652c277ca51ef0f7ac5e5c85700004000000039383739336364393161336638373066623132366636363238353830386337653039346166636663346564613861393730663636343863646630646264366465a3f5d1167a5c605fed71fc78d4381bef47a5acb3aba6fc9c07d7b8b912fc1e2a0100000006005b4cf697ce3c6ded94c7adfa3c2d8310cc1dda88828a238b48513df3fdec7ab8",
            "8c6d615c8b4afc0bfeaab1eab643d5b12ea0d8e017636b37b59433786c11fdd29b91432af4acdb116b88211e4bf4fdb0baaa50bc0243d47dcfed9d5121a98e04",
        ),
        (
            "delete_account",
            "0f00000073706563756c6f736163636f756e740061a91abba0099d3ef23923645b37f19e6ebfeb220b238ee9abef3eeb32f851b40f7ac5e5c85700000d00000072656365697665722e6e656172a3f5d1167a5c605fed71fc78d4381bef47a5acb3aba6fc9c07d7b8b912fc1e2a01000000070d00000062656e65666963696172796964",
            "f518bcebfc57c3bb10d07511a5819f0f048868657661fb84a05f09297d3cadeb9e6e5995addbb6f9cd6c28a31474306adf0a41914a83161f380cd8e6a0a1a705",
        ),
        (
            "add_key_function_call",
            "4000000062323832623666396135373161323764336363646536306637666531393463646434393864613737353334326131353837633636326334346266323134666232006d5cf886f80bba79e1f0efb939002b2908e8947042b8dc3014fbea645e632b290f7ac5e5c85700004000000039383739336364393161336638373066623132366636363238353830386337653039346166636663346564613861393730663636343863646630646264366465a3f5d1167a5c605fed71fc78d4381bef47a5acb3aba6fc9c07d7b8b912fc1e2a0100000005005b4cf697ce3c6ded94c7adfa3c2d8310cc1dda88828a238b48513df3fdec7ab839300000000000000001ffe30b540200000000000000000000000b000000526563656976657220696402000000080000004d6574686f642030080000004d6574686f642031",
            "927cad5aee066055a3042de85c92a2cccee77df6582a7218b6ffe5129c8151729db553e9aec1a138a40bc90e487eb7e2f68c58b9aa71e3e2d3ade6ecc7e9270e",
        ),
    ]
    .into_iter()
    .map(|(name, tx, signature)| Vector {
        name,
        tx: hex::decode(tx).unwrap(),
        signature: hex::decode(signature).unwrap(),
    })
    .collect();
}

pub fn init_logging() {
    let _ = simplelog::SimpleLogger::init(log::LevelFilter::Debug, Default::default());
}

/// Driver returning a fixed secret for every path
pub struct FixedKeyDriver {
    pub secret: [u8; 32],
    pub blind: bool,
}

impl FixedKeyDriver {
    pub fn new(blind: bool) -> Self {
        let mut secret = [0u8; 32];
        secret.copy_from_slice(&hex::decode(SECRET).unwrap());
        Self { secret, blind }
    }
}

impl Driver for FixedKeyDriver {
    fn slip10_derive_ed25519(&self, _path: &[u32]) -> [u8; 32] {
        self.secret
    }

    fn blind_signing_enabled(&self) -> bool {
        self.blind
    }
}

/// Driver implementation for test use, deriving keys from a BIP39 mnemonic
pub struct TestDriver {
    /// BIP39 Mnemonic derived seed
    pub seed: [u8; 64],
    pub blind: bool,
}

impl TestDriver {
    pub fn new() -> anyhow::Result<Self> {
        Self::from_phrase(MNEMONIC)
    }

    pub fn from_phrase(phrase: &str) -> anyhow::Result<Self> {
        let mnemonic = Mnemonic::from_phrase(phrase, Language::English)?;
        let seed = Seed::new(&mnemonic, "");

        let mut b = [0u8; 64];
        b.copy_from_slice(seed.as_bytes());
        Ok(Self {
            seed: b,
            blind: false,
        })
    }

    pub fn with_blind(mut self, blind: bool) -> Self {
        self.blind = blind;
        self
    }
}

impl Driver for TestDriver {
    fn slip10_derive_ed25519(&self, path: &[u32]) -> [u8; 32] {
        slip10_ed25519::derive_ed25519_private_key(&self.seed, path)
    }

    fn blind_signing_enabled(&self) -> bool {
        self.blind
    }
}

/// Build a command frame
pub fn frame(ins: u8, p1: u8, data: &[u8]) -> Vec<u8> {
    assert!(data.len() <= 255);

    let mut b = vec![0x80, ins, p1, 0x57, data.len() as u8];
    b.extend_from_slice(data);
    b
}

/// Split `path || tx` into signing frames of at most `chunk` data bytes
pub fn sign_frames(path: &[u8], tx: &[u8], chunk: usize) -> Vec<Vec<u8>> {
    let mut msg = path.to_vec();
    msg.extend_from_slice(tx);

    let chunks: Vec<_> = msg.chunks(chunk).collect();
    let n = chunks.len();

    chunks
        .into_iter()
        .enumerate()
        .map(|(i, c)| frame(0x02, if i + 1 == n { 0x80 } else { 0x00 }, c))
        .collect()
}

pub fn path() -> Vec<u8> {
    hex::decode(PATH).unwrap()
}

/// Response to a command
#[derive(Clone, PartialEq, Debug)]
pub enum Response {
    Complete(StatusWord, Vec<u8>),
    Deferred,
}

impl Response {
    pub fn status(&self) -> Option<StatusWord> {
        match self {
            Response::Complete(s, _) => Some(*s),
            Response::Deferred => None,
        }
    }
}

/// Device wrapper, exchanges frames with an engine via the dispatcher
pub struct Device<DRV: Driver> {
    pub engine: Engine<DRV>,
    buff: [u8; 256],
}

impl<DRV: Driver> Device<DRV> {
    pub fn new(drv: DRV) -> Self {
        Self {
            engine: Engine::new(drv),
            buff: [0u8; 256],
        }
    }

    pub fn exchange(&mut self, frame: &[u8]) -> Response {
        debug!("cmd: {:02x?}", frame);

        let r = match handle_apdu(&mut self.engine, frame, &mut self.buff) {
            Reply::Complete { status, len } => Response::Complete(status, self.buff[..len].to_vec()),
            Reply::Deferred => Response::Deferred,
        };

        debug!("resp: {:02x?}", r);
        r
    }

    pub fn input(&mut self, input: UserInput) -> Option<(StatusWord, Vec<u8>)> {
        match handle_input(&mut self.engine, input, &mut self.buff)? {
            Reply::Complete { status, len } => Some((status, self.buff[..len].to_vec())),
            Reply::Deferred => panic!("input cannot defer a response"),
        }
    }

    /// Step through every review field then confirm
    pub fn approve(&mut self) -> (StatusWord, Vec<u8>) {
        let pages = self.engine.review().expect("no active review").len();

        for _ in 0..pages {
            assert_eq!(self.input(UserInput::Next), None);
        }

        self.input(UserInput::Confirm)
            .expect("confirm did not complete review")
    }

    /// Send signing frames, returning the response to the final frame
    pub fn sign(&mut self, frames: &[Vec<u8>]) -> Response {
        let (last, rest) = frames.split_last().expect("no frames");

        for f in rest {
            assert_eq!(
                self.exchange(f),
                Response::Complete(StatusWord::Ok, vec![])
            );
        }

        self.exchange(last)
    }
}
