//! kexec - reboot into a new kernel without going through firmware

use kexec::cli::{self, Command};
use kexec::console::{self, STDERR, STDOUT};
use kexec::{logger, Environment, KexecConfig, KexecError, LinuxGateway, Sequencer, ThreadPause};

fn main() {
    let gateway = LinuxGateway::new();

    let invocation = match cli::parse(std::env::args_os()) {
        Ok(Command::Run(invocation)) => invocation,
        Ok(Command::Help { program }) => {
            console::println(&gateway, STDOUT, format_args!("{}", cli::help(&program)));
            gateway.terminate(0)
        }
        Ok(Command::Version) => {
            console::println(&gateway, STDOUT, format_args!("kexec {}", cli::VERSION));
            gateway.terminate(0)
        }
        Err(err) => fail(&gateway, &err),
    };

    let mut config = KexecConfig::new();
    config.set_verbosity(invocation.verbosity);
    let _ = logger::init(config.log_level());

    let env = Environment::current();
    log::debug!("running on {}/{} as euid {:?}", env.os, env.arch, env.euid);

    let mut sequencer = Sequencer::new(&gateway, &ThreadPause, config);
    match sequencer.run(&env, &invocation.kernel, &invocation.initrd) {
        Ok(never) => match never {},
        Err(err) => fail(&gateway, &err),
    }
}

fn fail(gateway: &LinuxGateway, err: &KexecError) -> ! {
    console::println(gateway, STDERR, format_args!("{}", err));
    gateway.terminate(err.exit_status())
}
