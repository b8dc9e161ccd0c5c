fn main() {
    multiversx_sc_meta_lib::cli_main::<p2p_tracker::AbiProvider>();
}
